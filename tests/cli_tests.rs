//! Command-line tests for the `studylog` binary.
//!
//! These run the compiled binary without a daemon, so they cover argument
//! parsing, local-only commands and the error path for an absent daemon.

use assert_cmd::Command;
use predicates::prelude::*;

fn studylog(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("studylog").unwrap();
    cmd.env("STUDYLOG_HOME", home).env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Completions
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("settings"))
        .stdout(predicate::str::contains("purge"))
        .stdout(predicate::str::contains("daemon"));
}

#[test]
fn test_no_command_prints_help() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studylog"));
}

// ============================================================================
// Argument Validation
// ============================================================================

#[test]
fn test_settings_rejects_non_numeric_value() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .args(["settings", "--work", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .arg("bogus")
        .assert()
        .failure();
}

#[test]
fn test_purge_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .arg("purge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

// ============================================================================
// Daemon Not Running
// ============================================================================

#[test]
fn test_status_without_daemon_fails() {
    let dir = tempfile::tempdir().unwrap();

    studylog(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("studylog daemon"));
}
