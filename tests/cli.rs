#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Nothing listens on port 1, so every request fails fast.
const DEAD_SERVER: &str = "http://127.0.0.1:1";

fn pastez_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("pastez"));
    cmd.env("PASTEZ_HOME", home.path().as_os_str())
        .env_remove("PASTEZ_SERVER")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn test_help_lists_command_groups() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Document Commands:"))
        .stdout(predicate::str::contains("Link Commands:"))
        .stdout(predicate::str::contains("share"));
}

#[test]
fn test_config_defaults_and_set() {
    let home = TempDir::new().unwrap();

    pastez_cmd(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("server = http://localhost:7777"))
        .stdout(predicate::str::contains("sharing_enabled = false"));

    pastez_cmd(&home)
        .args(["config", "sharing_enabled", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sharing_enabled set to true"));

    assert!(home.path().join("config.json").exists());
    let saved = fs::read_to_string(home.path().join("config.json")).unwrap();
    assert!(saved.contains("\"sharing_enabled\": true"));

    pastez_cmd(&home)
        .args(["config", "sharing_enabled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sharing_enabled = true"));
}

#[test]
fn test_config_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_get_missing_document_falls_back() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["--server", DEAD_SERVER, "get", "doesnotexist.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No document at doesnotexist.py"));
}

#[test]
fn test_new_blank_input_is_not_saved() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["--server", DEAD_SERVER, "new"])
        .write_stdin("   \n\t\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing saved: document is blank"));
}

#[test]
fn test_new_reports_store_failure() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["--server", DEAD_SERVER, "new"])
        .write_stdin("print('hello')\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Something went wrong!"));
}

#[test]
fn test_new_from_missing_file_fails() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["new", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_raw_unavailable_without_document() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .args(["--server", DEAD_SERVER, "raw", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("raw is not available"));
}

#[test]
fn test_server_env_override_is_used() {
    let home = TempDir::new().unwrap();
    pastez_cmd(&home)
        .env("PASTEZ_SERVER", DEAD_SERVER)
        .args(["-v", "get", "abc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using server http://127.0.0.1:1"));
}
