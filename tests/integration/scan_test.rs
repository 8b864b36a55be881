use crate::{fixture_path, svcmap};
use predicates::prelude::*;

fn scan_json(args: &[&str]) -> serde_json::Value {
    let output = svcmap().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn scan_fixture_json() {
    let root = fixture_path("shop");
    let json = scan_json(&["scan", root.to_str().unwrap(), "--quiet"]);

    assert_eq!(json["summary"]["services"], 3);
    assert_eq!(json["summary"]["dependencies"], 4);
    assert_eq!(json["summary"]["entities"], 2);
    assert_eq!(json["summary"]["endpoints"], 5);

    let services: Vec<&str> = json["contexts"]
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(services.len(), 3);
    for name in ["orders", "payments", "users"] {
        assert!(services.contains(&name), "missing {name}");
    }

    let orders = &json["contexts"]["orders"];
    assert_eq!(orders["endpoints"][0]["method"], "GetMapping");
    assert_eq!(orders["endpoints"][0]["return_type"], "List");
    assert_eq!(orders["endpoints"][1]["path"], "/orders, /orders/new");
    assert_eq!(orders["endpoints"][1]["params"][0], "Order");
    assert_eq!(orders["entities"][0]["name"], "Order");

    let users = &json["contexts"]["users"];
    assert_eq!(users["endpoints"][0]["method"], "ROUTE");
    assert_eq!(users["endpoints"][1]["method"], "GET");
    assert_eq!(users["endpoints"][1]["params"][0], "user_id");
    assert_eq!(users["entities"][0]["name"], "User");

    let stats = &json["stats"];
    assert_eq!(stats["files_skipped_syntax"], 1);
    assert_eq!(stats["subtrees_pruned"], 1);
    assert_eq!(stats["python_files"], 1);
}

#[test]
fn scan_edges_come_from_java_only() {
    let root = fixture_path("shop");
    let json = scan_json(&["scan", root.to_str().unwrap(), "--quiet"]);
    let edges: Vec<(String, String, String)> = json["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| {
            (
                d["caller"].as_str().unwrap().to_string(),
                d["callee"].as_str().unwrap().to_string(),
                d["label"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert!(edges.iter().all(|(caller, _, _)| caller != "users"));
    assert!(edges.contains(&(
        "orders".to_string(),
        "userServiceUrl".to_string(),
        "get".to_string()
    )));
    assert!(edges.contains(&(
        "orders".to_string(),
        "paymentUrl".to_string(),
        "delete".to_string()
    )));
    // Lexical detection still runs on a file that fails to parse
    assert!(edges.contains(&(
        "payments".to_string(),
        "userServiceUrl".to_string(),
        "put".to_string()
    )));
}

#[test]
fn scan_text_summary() {
    let root = fixture_path("shop");
    svcmap()
        .args(["scan", root.to_str().unwrap(), "--format", "text", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Summary ==="))
        .stdout(predicate::str::contains("Total detected dependencies: 4"))
        .stdout(predicate::str::contains("Total detected entities: 2"))
        .stdout(predicate::str::contains("Context Maps"));
}

#[test]
fn scan_dot_output() {
    let root = fixture_path("shop");
    svcmap()
        .args(["scan", root.to_str().unwrap(), "--format", "dot", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph service_dependencies"));
}

#[test]
fn scan_logs_syntax_failures() {
    let root = fixture_path("shop");
    svcmap()
        .env("RUST_LOG", "warn")
        .args(["scan", root.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Legacy.java"));
}

#[test]
fn scan_missing_root_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    svcmap()
        .args(["scan", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read scan root"));
}

#[test]
fn scan_root_that_is_a_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();
    svcmap()
        .args(["scan", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn scan_two_services_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("repo");
    std::fs::create_dir_all(root.join("serviceA/src")).unwrap();
    std::fs::create_dir_all(root.join("serviceB")).unwrap();
    std::fs::write(
        root.join("serviceA/src/Main.java"),
        "public class Main {\n    @GetMapping(\"/ping\")\n    public String ping() { return \"pong\"; }\n}\n",
    )
    .unwrap();
    std::fs::write(
        root.join("serviceB/app.py"),
        "@app.get(\"/health\")\ndef health():\n    return \"ok\"\n",
    )
    .unwrap();

    let json = scan_json(&["scan", root.to_str().unwrap(), "--quiet"]);
    let contexts = json["contexts"].as_object().unwrap();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts["serviceA"]["endpoints"][0]["path"], "/ping");
    assert_eq!(contexts["repo"]["endpoints"][0]["path"], "/health");
    for ctx in contexts.values() {
        assert_eq!(ctx["endpoints"].as_array().unwrap().len(), 1);
        assert!(ctx["entities"].as_array().unwrap().is_empty());
    }
    assert!(json["dependencies"].as_array().unwrap().is_empty());
}

#[test]
fn scan_exclude_flag_skips_sources() {
    let root = fixture_path("shop");
    let json = scan_json(&[
        "scan",
        root.to_str().unwrap(),
        "--quiet",
        "--exclude",
        "payments/**",
    ]);
    assert!(json["contexts"].get("payments").is_none());
    assert_eq!(json["summary"]["dependencies"], 3);
}

#[test]
fn scan_format_from_environment() {
    let root = fixture_path("shop");
    svcmap()
        .env("SVCMAP_FORMAT", "text")
        .args(["scan", root.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total detected dependencies"));
}

#[test]
fn scan_respects_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("api/handlers")).unwrap();
    std::fs::write(
        root.join(".svcmap.toml"),
        "[python]\nroute_decorators = [\"delete\"]\nmodel_base = \"Base\"\n",
    )
    .unwrap();
    std::fs::write(
        root.join("api/handlers/views.py"),
        "@app.delete(\"/x\")\ndef drop():\n    pass\n\n@app.get(\"/y\")\ndef read():\n    pass\n\nclass Row(Base):\n    pass\n",
    )
    .unwrap();

    let json = scan_json(&["scan", root.to_str().unwrap(), "--quiet"]);
    let api = &json["contexts"]["api"];
    assert_eq!(api["endpoints"].as_array().unwrap().len(), 1);
    assert_eq!(api["endpoints"][0]["method"], "DELETE");
    assert_eq!(api["entities"][0]["name"], "Row");
}
