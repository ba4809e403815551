//! CLI smoke tests.
//!
//! These exercise the binary's fail-fast paths, which need no network or
//! configured repository.

use assert_cmd::Command;
use predicates::prelude::*;

/// A command with every registry variable scrubbed from the environment.
fn moor() -> Command {
    let mut cmd = Command::cargo_bin("moor").unwrap();
    for var in [
        "GITHUB_TOKEN",
        "GITHUB_REPO",
        "GITHUB_FILE_PATH",
        "GITHUB_BRANCH",
        "GITHUB_COMMITTER_NAME",
        "GITHUB_COMMITTER_EMAIL",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_commands() {
    moor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get").and(predicate::str::contains("set")));
}

#[test]
fn get_without_configuration_fails_fast() {
    moor()
        .arg("get")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn set_reports_unreadable_input_file() {
    moor()
        .args(["set", "/nonexistent/records.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn set_rejects_non_array_input() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("records.json");
    std::fs::write(&file, r#"{"id": "V1"}"#).unwrap();

    moor()
        .args(["set", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn set_with_valid_file_still_requires_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("records.json");
    std::fs::write(&file, r#"[{"id": "V1"}]"#).unwrap();

    moor()
        .args(["set", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_TOKEN"));
}
