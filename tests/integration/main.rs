mod config_test;
mod graph_test;
mod scan_test;
mod urls_test;

use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// `svcmap` with the format/exclude environment cleared.
pub fn svcmap() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("svcmap").unwrap();
    cmd.env_remove("SVCMAP_FORMAT")
        .env_remove("SVCMAP_QUIET")
        .env_remove("SVCMAP_EXCLUDE");
    cmd
}
