//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed as `CODE: message` and the
//! process exits non-zero.

use std::fmt;
use std::io;

use crate::auth::AuthError;
use crate::backend::BackendError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, socket)
    IoError,
    /// Backend could not be constructed
    BackendError,
    /// Token could not be issued
    TokenError,
    /// Logging could not be initialized
    LoggingError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SHEETDESK_CLI_CONFIG_ERROR",
            Self::IoError => "SHEETDESK_CLI_IO_ERROR",
            Self::BackendError => "SHEETDESK_CLI_BACKEND_ERROR",
            Self::TokenError => "SHEETDESK_CLI_TOKEN_ERROR",
            Self::LoggingError => "SHEETDESK_CLI_LOGGING_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Logging setup error
    pub fn logging_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoggingError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<BackendError> for CliError {
    fn from(e: BackendError) -> Self {
        Self::new(CliErrorCode::BackendError, e.to_string())
    }
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        Self::new(CliErrorCode::TokenError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
