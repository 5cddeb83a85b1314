//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the trilha-verde binary
fn service_cmd() -> Command {
    Command::cargo_bin("trilha-verde").unwrap()
}

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    service_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trilha Verde"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    service_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trilha-verde"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_short_version_flag() {
    service_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trilha-verde"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    service_cmd()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[server]"))
        .stdout(predicate::str::contains("[provider]"))
        .stdout(predicate::str::contains("[storage]"))
        .stdout(predicate::str::contains("[telemetry]"))
        .stdout(predicate::str::contains("[guidance]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_default() {
    // Default config should always be valid
    service_cmd()
        .arg("config")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/path/config.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found").or(predicate::str::contains("Error")));
}

#[test]
fn test_config_validate_rejects_live_mode_without_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[provider]
mock_mode = false
api_key = ""
"#,
    )
    .unwrap();

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_key"));
}

#[test]
fn test_config_init_help() {
    service_cmd()
        .arg("config")
        .arg("init")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    service_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[provider]"));
    assert!(content.contains("mock_mode"));

    // Refuses to overwrite without --force
    service_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(path.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ─────────────────────────────────────────────────────────────────
// Serve Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_serve_help() {
    service_cmd()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run the HTTP server"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--mock"));
}

#[test]
fn test_serve_with_invalid_config() {
    service_cmd()
        .arg("serve")
        .arg("--config")
        .arg("/nonexistent/config.toml")
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────
// Verbosity Flag Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_verbose_flag() {
    // -v should work without errors
    service_cmd()
        .arg("-v")
        .arg("version")
        .assert()
        .success();
}

#[test]
fn test_very_verbose_flag() {
    // -vv should work without errors
    service_cmd()
        .arg("-vv")
        .arg("version")
        .assert()
        .success();
}

#[test]
fn test_quiet_flag() {
    service_cmd()
        .arg("--quiet")
        .arg("version")
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    service_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    // Running without any command should show help or error
    service_cmd().assert().failure();
}
