//! Binary-level tests. None of these reach a store: each run fails on
//! configuration or input before the first network call.

use assert_cmd::Command;
use std::path::Path;

const STORE_VARS: [&str; 3] = ["DECKUP_STORE_URL", "DECKUP_STORE_KEY", "DECKUP_USER_ID"];

/// A `deckup` command with no ambient store settings.
fn deckup(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deckup").unwrap();
    for var in STORE_VARS {
        cmd.env_remove(var);
    }
    cmd.env("DECKUP_CONFIG", config_path).env_remove("RUST_LOG");
    cmd
}

fn stderr_of(cmd: &mut Command, code: i32) -> String {
    let assert = cmd.assert().failure().code(code);
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    let assert = deckup(&dir.path().join("config.json"))
        .arg("--help")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains("--file"));
    assert!(stdout.contains("--name"));
}

#[test]
fn version_flag() {
    let dir = tempfile::tempdir().unwrap();
    let assert = deckup(&dir.path().join("config.json"))
        .arg("--version")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_config_exits_with_config_code() {
    let dir = tempfile::tempdir().unwrap();
    let stderr = stderr_of(&mut deckup(&dir.path().join("absent.json")), 5);

    assert!(stderr.contains("Configuration error"));
    assert!(stderr.contains("DECKUP_STORE_URL"));
    assert!(stderr.contains("Hint:"));
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{not json").unwrap();

    let stderr = stderr_of(&mut deckup(&config), 5);
    assert!(stderr.contains("Failed to parse config file"));
}

#[test]
fn missing_input_file_fails_before_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"store_url": "http://127.0.0.1:9", "store_key": "k", "user_id": "u"}"#,
    )
    .unwrap();
    let missing = dir.path().join("nope.txt");

    let stderr = stderr_of(deckup(&config).arg("--file").arg(&missing), 4);
    assert!(stderr.contains("Input file not found"));
    assert!(!stderr.contains("HTTP error"));
}

#[test]
fn env_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"store_url": "http://127.0.0.1:9"}"#).unwrap();

    // Key and user come from the environment; the input file is still missing.
    let stderr = stderr_of(
        deckup(&config)
            .env("DECKUP_STORE_KEY", "k")
            .env("DECKUP_USER_ID", "u")
            .arg("--file")
            .arg(dir.path().join("nope.txt")),
        4,
    );
    assert!(stderr.contains("Input file not found"));
}
