//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` and `analyze --json` to assert actual effects.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run a command from a directory and parse its JSON stdout.
fn json_in(dir: &std::path::Path, args: &[&str], stdin: &str) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap()])
        .args(args)
        .arg("--json")
        .write_stdin(stdin)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = json_in(tmp.path(), &["info"], "");

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["words_per_minute"], 200);
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textstat.toml"), "log_level = \"debug\"\n").unwrap();

    let json = json_in(tmp.path(), &["info"], "");

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with(".textstat.toml"), "reported: {reported}");
}

#[test]
fn yaml_config_changes_top_words() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.yaml"), "top_words: 2\n").unwrap();

    let json = json_in(tmp.path(), &["analyze"], "c b a c b c");
    let top = json["most_common_words"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["word"], "c");
    assert_eq!(top[1]["word"], "b");
}

#[test]
fn config_changes_reading_speed() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "words_per_minute = 10\n").unwrap();

    let json = json_in(tmp.path(), &["analyze"], &"word ".repeat(25));
    assert_eq!(json["reading_time_minutes"], 2.5);
}

#[test]
fn explicit_config_flag_wins() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "history_capacity = 3\n").unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, "history_capacity = 9\n").unwrap();

    let json = json_in(
        tmp.path(),
        &["--config", explicit.to_str().unwrap(), "info"],
        "",
    );
    assert_eq!(json["config"]["history_capacity"], 9);
}

#[test]
fn zero_history_capacity_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "history_capacity = 0\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "session"])
        .write_stdin("3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("history_capacity"));
}

#[test]
fn info_reports_zero_history_capacity() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "history_capacity = 0\n").unwrap();

    let json = json_in(tmp.path(), &["info"], "");
    assert_eq!(json["config"]["history_capacity"], 0);
}

#[test]
fn zero_top_words_fails_analyze() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "top_words = 0\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze"])
        .write_stdin("some text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid analyzer settings"));
}

#[test]
fn malformed_config_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("textstat.toml"), "top_words = \"many\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn log_dir_receives_jsonl_file() {
    let tmp = TempDir::new().unwrap();
    let logs = tmp.path().join("logs");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "-v", "info"])
        .env("TEXTSTAT_LOG_DIR", logs.to_str().unwrap())
        .assert()
        .success();

    assert!(logs.join("textstat.jsonl").is_file());
}
