//! Configuration system tests
//!
//! Tests configuration loading, validation, and environment overrides

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for configuration testing
struct ConfigFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }

    fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }
}

fn service_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("trilha-verde").unwrap()
}

// ─────────────────────────────────────────────────────────────────
// Valid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_minimal_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[server]

[provider]

[storage]
"#,
    );

    // Validate via CLI
    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();
}

#[test]
fn test_full_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[server]
host = "127.0.0.1"
port = 8080
cors_origins = ["http://localhost:3000"]

[provider]
mock_mode = false
base_url = "https://api.mistral.ai/v1"
api_key = "sk-test"
model = "mistral-small-latest"
temperature = 0.5
max_tokens = 600
timeout_secs = 20
max_retries = 3
cache_ttl_secs = 600
cache_max_entries = 200

[storage]
data_dir = "/tmp/trilha-verde/data"
personas_file = "personas.json"
events_file = "events.json"

[telemetry]
enabled = true
flush_every = 5
retention_days = 30

[guidance]
default_language = "pt-BR"
max_recommendations = 8
min_relevance_score = 0.2

[logging]
level = "debug"
file = "/tmp/trilha-verde/service.log"
json_format = false
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────
// Invalid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_live_mode_without_api_key() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
mock_mode = false
api_key = ""
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn test_invalid_temperature() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
temperature = 3.5
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn test_invalid_relevance_score() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[guidance]
min_relevance_score = 1.5
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn test_invalid_log_level() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[logging]
level = "invalid_level"
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn test_malformed_toml() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[server
host = "127.0.0.1"
"#,
    );

    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────
// Config Show Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_custom() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[server]
host = "10.0.0.5"
port = 9090

[provider]
model = "mistral-large-latest"

[guidance]
max_recommendations = 7
"#,
    );

    service_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("10.0.0.5"))
        .stdout(predicates::str::contains("9090"))
        .stdout(predicates::str::contains("mistral-large-latest"))
        .stdout(predicates::str::contains("max_recommendations = 7"));
}

// ─────────────────────────────────────────────────────────────────
// Config Init Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_init_creates_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("new_config.toml");

    service_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(config_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("Configuration file created"));

    assert!(config_path.exists());

    // The generated config must pass validation
    service_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn test_config_init_force_overwrite() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[server]\nhost = \"old-host\"\n");

    service_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(fixture.path())
        .arg("--force")
        .assert()
        .success();

    // Verify file was overwritten
    let content = fs::read_to_string(fixture.path()).unwrap();
    assert!(!content.contains("old-host"));
}

// ─────────────────────────────────────────────────────────────────
// Environment Variable Override Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_env_override_port() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[server]
port = 8000
"#,
    );

    service_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .env("TRILHA_PORT", "9999")
        .assert()
        .success()
        .stdout(predicates::str::contains("9999"));
}

#[test]
fn test_env_override_model() {
    service_cmd()
        .arg("config")
        .arg("show")
        .env("TRILHA_PROVIDER_MODEL", "mistral-medium-latest")
        .env("TRILHA_DATA_DIR", "/tmp/trilha-env-data")
        .assert()
        .success()
        .stdout(predicates::str::contains("mistral-medium-latest"))
        .stdout(predicates::str::contains("/tmp/trilha-env-data"));
}

// ─────────────────────────────────────────────────────────────────
// Path Expansion Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_tilde_expansion() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[storage]
data_dir = "~/trilha-verde/data"
"#,
    );

    let output = service_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();

    // Tilde should be expanded away
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("data_dir = \"~"));
}
