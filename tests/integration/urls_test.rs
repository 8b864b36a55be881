use crate::{fixture_path, svcmap};
use predicates::prelude::*;

#[test]
fn urls_text_lists_keys_including_test_dirs() {
    let root = fixture_path("shop");
    svcmap()
        .args(["urls", root.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("userServiceUrl"))
        .stdout(predicate::str::contains("http://payment-service:8083"))
        .stdout(predicate::str::contains("mockUrl"))
        .stdout(predicate::str::contains("authUrl"))
        .stdout(predicate::str::contains("server.port").not());
}

#[test]
fn urls_json_in_table_order() {
    let root = fixture_path("shop");
    let output = svcmap()
        .args(["urls", root.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["userServiceUrl", "paymentUrl", "mockUrl", "authUrl"]);
    assert_eq!(json[3]["format"], "yaml");
}

#[test]
fn urls_empty_tree() {
    let tmp = tempfile::tempdir().unwrap();
    svcmap()
        .args(["urls", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No URL keys found."));
}
