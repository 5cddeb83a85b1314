//! Configuration system for Trilha Verde
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (TRILHA_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Language;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerSettings,

    /// Model provider settings
    pub provider: ProviderSettings,

    /// Data storage paths
    pub storage: StorageSettings,

    /// Interaction event log settings
    pub telemetry: TelemetrySettings,

    /// Guidance and recommendation tuning
    pub guidance: GuidanceSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Allowed CORS origins for the web front-end
    pub cors_origins: Vec<String>,
}

/// Model provider settings (OpenAI-compatible chat completions API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Serve canned responses instead of calling the hosted model
    pub mock_mode: bool,

    /// API base URL
    pub base_url: String,

    /// API key (empty forces mock mode)
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum completion tokens
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    pub max_retries: u32,

    /// Response cache TTL in seconds
    pub cache_ttl_secs: u64,

    /// Maximum cached responses
    pub cache_max_entries: usize,
}

/// Storage path settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Base data directory
    pub data_dir: String,

    /// Persona store file name (relative to data_dir)
    pub personas_file: String,

    /// Event log file name (relative to data_dir)
    pub events_file: String,
}

/// Interaction event log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Record interaction events
    pub enabled: bool,

    /// Flush buffered events to disk after this many appends
    pub flush_every: usize,

    /// Drop events older than this many days on flush
    pub retention_days: u32,
}

/// Guidance and recommendation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceSettings {
    /// Default reply language tag
    pub default_language: String,

    /// Maximum entries returned by recommendation endpoints
    pub max_recommendations: usize,

    /// Minimum relevance score for a catalog entry to be returned
    pub min_relevance_score: f64,
}

impl GuidanceSettings {
    /// Parsed default reply language.
    ///
    /// `validate()` rejects unknown tags, so the fallback only covers
    /// configs that were never validated.
    pub fn language(&self) -> Language {
        self.default_language.parse().unwrap_or_default()
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            provider: ProviderSettings::default(),
            storage: StorageSettings::default(),
            telemetry: TelemetrySettings::default(),
            guidance: GuidanceSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            mock_mode: true,
            base_url: "https://api.mistral.ai/v1".to_string(),
            api_key: String::new(),
            model: "mistral-small-latest".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 30,
            max_retries: 2,
            cache_ttl_secs: 3600,
            cache_max_entries: 1000,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            personas_file: "personas.json".to_string(),
            events_file: "events.json".to_string(),
        }
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            flush_every: 10,
            retention_days: 90,
        }
    }
}

impl Default for GuidanceSettings {
    fn default() -> Self {
        Self {
            default_language: "pt-BR".to_string(),
            max_recommendations: 5,
            min_relevance_score: 0.3,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json_format: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        let config_file = Self::find_config_file(config_path)?;
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: e.to_string(),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let expanded = shellexpand::tilde(path);
            let path = PathBuf::from(expanded.as_ref());
            if path.exists() {
                return Ok(Some(path));
            } else {
                return Err(Error::config_not_found(path));
            }
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            PathBuf::from("trilha-verde.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("trilha-verde").join("config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".trilha-verde").join("config.toml"))
                .unwrap_or_default(),
            // System config (Linux)
            PathBuf::from("/etc/trilha-verde/config.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Server settings
        if let Ok(val) = std::env::var("TRILHA_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("TRILHA_PORT") {
            if let Ok(n) = val.parse() {
                self.server.port = n;
            }
        }
        if let Ok(val) = std::env::var("TRILHA_CORS_ORIGINS") {
            self.server.cors_origins = val.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Provider settings
        if let Ok(val) = std::env::var("TRILHA_MOCK_MODE") {
            self.provider.mock_mode = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_BASE_URL") {
            self.provider.base_url = val;
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_API_KEY") {
            self.provider.api_key = val;
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_MODEL") {
            self.provider.model = val;
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_TEMPERATURE") {
            if let Ok(n) = val.parse() {
                self.provider.temperature = n;
            }
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.provider.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("TRILHA_PROVIDER_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.provider.timeout_secs = n;
            }
        }

        // Storage settings
        if let Ok(val) = std::env::var("TRILHA_DATA_DIR") {
            self.storage.data_dir = val;
        }

        // Telemetry settings
        if let Ok(val) = std::env::var("TRILHA_TELEMETRY_ENABLED") {
            self.telemetry.enabled = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = std::env::var("TRILHA_RETENTION_DAYS") {
            if let Ok(n) = val.parse() {
                self.telemetry.retention_days = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("TRILHA_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("TRILHA_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("TRILHA_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.storage.data_dir = expand_path(&self.storage.data_dir);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        // An empty API key cannot back a live provider
        if !self.provider.mock_mode && self.provider.api_key.is_empty() {
            return Err(Error::config_field_invalid(
                "provider.api_key",
                "api_key is required when mock_mode is false",
            ));
        }

        if self.provider.temperature < 0.0 || self.provider.temperature > 2.0 {
            return Err(Error::config_field_invalid(
                "provider.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if self.provider.max_tokens == 0 {
            return Err(Error::config_field_invalid(
                "provider.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if self.guidance.min_relevance_score < 0.0 || self.guidance.min_relevance_score > 1.0 {
            return Err(Error::config_field_invalid(
                "guidance.min_relevance_score",
                "min_relevance_score must be between 0.0 and 1.0",
            ));
        }

        if self.guidance.max_recommendations == 0 {
            return Err(Error::config_field_invalid(
                "guidance.max_recommendations",
                "max_recommendations must be greater than 0",
            ));
        }

        if self.guidance.default_language.parse::<Language>().is_err() {
            return Err(Error::config_field_invalid(
                "guidance.default_language",
                "default_language must be one of: en, pt-BR",
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Get the data directory as a PathBuf
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Get the persona store file path
    pub fn personas_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.personas_file)
    }

    /// Get the event log file path
    pub fn events_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.events_file)
    }

    /// Whether the provider should answer from canned responses
    pub fn effective_mock_mode(&self) -> bool {
        self.provider.mock_mode || self.provider.api_key.is_empty()
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<()> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".trilha-verde")
                .join("config.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Generate default config with comments
    let config_content = generate_default_config();

    // Write the file
    fs::write(&config_path, config_content).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("Configuration file created: {}", config_path.display());
    Ok(())
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Trilha Verde Configuration
# https://github.com/trilha-verde/trilha-verde

[server]
# Bind address
host = "0.0.0.0"

# Listen port
port = 8000

# Allowed CORS origins for the web front-end
cors_origins = ["http://localhost:5173"]

[provider]
# Serve canned responses instead of calling the hosted model.
# An empty api_key forces mock mode regardless of this flag.
mock_mode = true

# OpenAI-compatible chat completions API base URL
base_url = "https://api.mistral.ai/v1"

# API key (prefer TRILHA_PROVIDER_API_KEY over storing it here)
api_key = ""

# Model identifier
model = "mistral-small-latest"

# Sampling temperature
temperature = 0.7

# Maximum completion tokens
max_tokens = 500

# Request timeout in seconds
timeout_secs = 30

# Maximum retries on transient failures
max_retries = 2

# Response cache TTL in seconds
cache_ttl_secs = 3600

# Maximum cached responses
cache_max_entries = 1000

[storage]
# Base data directory
data_dir = "./data"

# Persona store file name (relative to data_dir)
personas_file = "personas.json"

# Event log file name (relative to data_dir)
events_file = "events.json"

[telemetry]
# Record interaction events
enabled = true

# Flush buffered events to disk after this many appends
flush_every = 10

# Drop events older than this many days on flush
retention_days = 90

[guidance]
# Default reply language tag
default_language = "pt-BR"

# Maximum entries returned by recommendation endpoints
max_recommendations = 5

# Minimum relevance score for a catalog entry to be returned
min_relevance_score = 0.3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.trilha-verde/logs/service.log"

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
