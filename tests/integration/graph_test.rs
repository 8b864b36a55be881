use crate::{fixture_path, svcmap};
use predicates::prelude::*;

#[test]
fn graph_defaults_to_dot() {
    let root = fixture_path("shop");
    svcmap()
        .args(["graph", root.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph service_dependencies"))
        .stdout(predicate::str::contains(
            "\"orders\" -> \"userServiceUrl\" [label=\"get\", color=blue",
        ))
        .stdout(predicate::str::contains(
            "\"orders\" -> \"paymentUrl\" [label=\"post\", color=green",
        ))
        .stdout(predicate::str::contains("\"orders\" [size_hint=12000"))
        .stdout(predicate::str::contains("\"users\" [size_hint=3000"))
        .stdout(predicate::str::contains("HTTP Methods"));
}

#[test]
fn graph_json() {
    let root = fixture_path("shop");
    let output = svcmap()
        .args(["graph", root.to_str().unwrap(), "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let nodes = json["nodes"].as_array().unwrap();
    let names: Vec<&str> = nodes.iter().map(|n| n["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["orders", "payments", "users", "userServiceUrl", "paymentUrl"]
    );
    assert_eq!(json["edges"].as_array().unwrap().len(), 4);
    assert!(json["edges"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["label"] == "delete" && e["color"] == "red"));
}

#[test]
fn graph_rejects_text_format() {
    let root = fixture_path("shop");
    svcmap()
        .args(["graph", root.to_str().unwrap(), "--format", "text", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported for graph"));
}
