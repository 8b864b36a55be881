use crate::svcmap;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    // No config file present, so every setting is a default
    let tmp = tempfile::tempdir().unwrap();
    svcmap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains(
            "defaults.format: (command default) <- default",
        ))
        .stdout(predicate::str::contains("defaults.quiet: false <- default"))
        .stdout(predicate::str::contains(
            "targeting.excluded_dirs: [\"test\"] <- default",
        ))
        .stdout(predicate::str::contains(
            "calls.verbs: [\"post\", \"get\", \"put\", \"delete\"] <- default",
        ));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".svcmap.toml"),
        r#"
[defaults]
format = "text"
quiet = true

[java]
entity_markers = ["@Entity"]
"#,
    )
    .unwrap();

    svcmap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files:"))
        .stdout(predicate::str::contains(".svcmap.toml"))
        .stdout(predicate::str::contains(
            "defaults.format: text <- project config",
        ))
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- project config",
        ))
        .stdout(predicate::str::contains(
            "java.entity_markers: [\"@Entity\"] <- project config",
        ));
}

#[test]
fn config_show_env_override() {
    let tmp = tempfile::tempdir().unwrap();
    svcmap()
        .env("SVCMAP_EXCLUDE", "legacy/**, vendor/**")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "targeting.exclude: [\"legacy/**\", \"vendor/**\"] <- env var (SVCMAP_EXCLUDE)",
        ));
}

#[test]
fn config_rejects_unknown_keys() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".svcmap.toml"), "[rules]\nmin_fanout = 3\n").unwrap();
    svcmap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}
