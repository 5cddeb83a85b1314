//! Error types for the Trilha Verde service
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Provider errors (3xx)
    ProviderUnavailable = 300,
    ProviderTimeout = 301,
    ProviderRateLimited = 302,
    ProviderResponse = 303,
    ProviderAuth = 304,

    // Request errors (4xx)
    RequestInvalid = 400,
    PersonaNotFound = 404,
    ContentBlocked = 451,

    // Storage errors (5xx)
    StorageRead = 500,
    StorageWrite = 501,
    StorageCorrupted = 502,

    // Internal errors (9xx)
    InternalError = 900,
    NotSupported = 902,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Provider errors
            400..=499 => 40, // Request errors
            500..=599 => 50, // Storage errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the service
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Provider Errors
    // ─────────────────────────────────────────────────────────────

    /// Provider request failed
    #[error("Provider request to {endpoint} failed: {message}")]
    ProviderUnavailable { endpoint: String, message: String },

    /// Provider timed out
    #[error("Provider request timed out after {timeout_secs}s")]
    ProviderTimeout { timeout_secs: u64 },

    /// Provider rate limit hit
    #[error("Provider rate limit exceeded (HTTP 429)")]
    ProviderRateLimited,

    /// Provider returned an unusable body
    #[error("Unexpected provider response: {message}")]
    ProviderResponse { message: String },

    /// Provider rejected the API key
    #[error("Provider authentication failed: {message}")]
    ProviderAuth { message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ─────────────────────────────────────────────────────────────
    // Request Errors
    // ─────────────────────────────────────────────────────────────

    /// Client sent an invalid request
    #[error("Invalid request: {message}")]
    RequestInvalid { message: String },

    /// Persona lookup miss
    #[error("Persona not found: {persona_id}")]
    PersonaNotFound { persona_id: String },

    /// Message rejected by the safety screen
    #[error("Message blocked by safety screen ({category}): {message}")]
    ContentBlocked { category: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// Store file read failure
    #[error("Failed to read store {path}: {message}")]
    StorageRead { path: PathBuf, message: String },

    /// Store file write failure
    #[error("Failed to write store {path}: {message}")]
    StorageWrite { path: PathBuf, message: String },

    /// Store contents do not deserialize
    #[error("Store file corrupted: {path}")]
    StorageCorrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Feature not supported
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::ProviderUnavailable { .. } => ErrorCode::ProviderUnavailable,
            Error::ProviderTimeout { .. } => ErrorCode::ProviderTimeout,
            Error::ProviderRateLimited => ErrorCode::ProviderRateLimited,
            Error::ProviderResponse { .. } => ErrorCode::ProviderResponse,
            Error::ProviderAuth { .. } => ErrorCode::ProviderAuth,
            Error::Http(_) => ErrorCode::ProviderUnavailable,

            Error::RequestInvalid { .. } => ErrorCode::RequestInvalid,
            Error::PersonaNotFound { .. } => ErrorCode::PersonaNotFound,
            Error::ContentBlocked { .. } => ErrorCode::ContentBlocked,

            Error::StorageRead { .. } => ErrorCode::StorageRead,
            Error::StorageWrite { .. } => ErrorCode::StorageWrite,
            Error::StorageCorrupted { .. } => ErrorCode::StorageCorrupted,

            Error::NotSupported(_) => ErrorCode::NotSupported,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::ProviderUnavailable { .. }
                | Error::ProviderTimeout { .. }
                | Error::ProviderRateLimited
                | Error::Http(_)
                | Error::Io(_)
                | Error::IoRead { .. }
                | Error::IoWrite { .. }
        )
    }

    /// Check if the error is fatal (service should exit)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigValidation { .. }
                | Error::Internal(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'trilha-verde config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'trilha-verde config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values. See documentation for valid options."
            ),

            Error::ProviderUnavailable { .. } => Some(
                "Check your network connection and verify the provider endpoint is correct. The service keeps answering in mock mode."
            ),
            Error::ProviderTimeout { .. } => Some(
                "The model provider may be overloaded. Increase 'timeout_secs' under [provider] or try again later."
            ),
            Error::ProviderRateLimited => Some(
                "Too many provider requests. Slow down or raise your provider plan limits."
            ),
            Error::ProviderAuth { .. } => Some(
                "Set a valid API key via TRILHA_PROVIDER_API_KEY or the 'api_key' field under [provider]."
            ),

            Error::PersonaNotFound { .. } => Some(
                "List stored personas with GET /v1/personas or create one with POST /v1/personas."
            ),
            Error::StorageCorrupted { .. } => Some(
                "A .backup copy sits next to the store file. Restore it or delete the store to start fresh."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a provider unavailable error
    pub fn provider_unavailable(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ProviderUnavailable {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a provider response error
    pub fn provider_response(message: impl Into<String>) -> Self {
        Error::ProviderResponse {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Error::RequestInvalid {
            message: message.into(),
        }
    }

    /// Create a persona not found error
    pub fn persona_not_found(persona_id: impl Into<String>) -> Self {
        Error::PersonaNotFound {
            persona_id: persona_id.into(),
        }
    }

    /// Create a storage write error
    pub fn storage_write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::StorageWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a storage read error
    pub fn storage_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::StorageRead {
            path: path.into(),
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::ProviderUnavailable.as_str(), "E300");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::ProviderUnavailable.exit_code(), 30);
        assert_eq!(ErrorCode::StorageWrite.exit_code(), 50);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_display() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/path/to/config.toml"),
            source: None,
        };
        assert!(err.to_string().contains("/path/to/config.toml"));
    }

    #[test]
    fn test_error_codes() {
        let err = Error::config_not_found("/test");
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);

        let err = Error::provider_unavailable("https://api.test", "refused");
        assert_eq!(err.code(), ErrorCode::ProviderUnavailable);

        let err = Error::persona_not_found("abc-123");
        assert_eq!(err.code(), ErrorCode::PersonaNotFound);
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::provider_unavailable("url", "test").is_retryable());
        assert!(Error::ProviderTimeout { timeout_secs: 30 }.is_retryable());
        assert!(Error::ProviderRateLimited.is_retryable());
        assert!(!Error::config_not_found("/test").is_retryable());
        assert!(!Error::persona_not_found("x").is_retryable());
    }

    #[test]
    fn test_error_fatal() {
        assert!(Error::config_not_found("/test").is_fatal());
        assert!(Error::config_validation("bad port").is_fatal());
        assert!(!Error::provider_unavailable("url", "test").is_fatal());
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().is_some());
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::ProviderAuth { message: "401".into() };
        assert!(err.suggestion().is_some());
        assert!(err.suggestion().unwrap().contains("TRILHA_PROVIDER_API_KEY"));
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_terminal();

        // Should contain error code
        assert!(formatted.contains("E100"));
        // Should contain ANSI color codes
        assert!(formatted.contains("\x1b[31m"));
        // Should contain hint
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::config_not_found("/test/config.toml");
        let formatted = err.format_for_log();

        // Should contain error code
        assert!(formatted.contains("[E100]"));
        // Should NOT contain ANSI codes
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
