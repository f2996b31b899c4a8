//! Structured error handling with context and recovery suggestions
//!
//! Errors carry a numeric code for programmatic handling, optional context
//! describing what was being attempted, and an optional recovery suggestion.

use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,

    // Validation errors (6xxx)
    InvalidFormat = 6002,

    // Patch errors (7xxx)
    MarkerNotFound = 7001,
    UnbalancedBlock = 7002,
    BackupFailed = 7003,

    // Platform-specific errors (8xxx)
    PubCacheError = 8001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .findeasy-tools.toml file or use --config to specify a path")
    }

    pub fn pub_cache(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::PubCacheError,
            format!("Cannot read pub cache directory: {}", path.as_ref().display()),
        )
        .with_suggestion("Run `flutter pub get` first, or pass --pub-cache to point at the cache")
    }

    pub fn marker_not_found(marker: &str) -> Self {
        Self::new(
            ErrorCode::MarkerNotFound,
            format!("Start marker not found: {}", marker),
        )
    }

    pub fn unbalanced_block(open: &str, close: &str) -> Self {
        Self::new(
            ErrorCode::UnbalancedBlock,
            format!("No matching {} for {}", close, open),
        )
    }

    pub fn backup(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::BackupFailed,
            format!("Failed to back up {}", path.as_ref().display()),
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("Regex error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::UnbalancedBlock.to_string(), "E7002");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::pub_cache("/home/me/.pub-cache/hosted/pub.dev")
            .with_context("While scanning for path_provider_android");

        assert_eq!(err.code, ErrorCode::PubCacheError);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_result_context_is_rendered() {
        let result: Result<()> = Err(Error::unbalanced_block("#if", "#endif"));
        let err = result.context("RecordConfig.swift").unwrap_err();

        let rendered = err.to_string();
        assert!(rendered.starts_with("[E7002] No matching #endif for #if"));
        assert!(rendered.contains("Context: RecordConfig.swift"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(err.source.is_some());
    }
}
