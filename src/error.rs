//! Error types for the shell.
//!
//! Completion paths never surface these to the user; they are logged and
//! collapsed into empty candidate lists. Command paths print them as a
//! one-line diagnostic.

use thiserror::Error;

/// Errors produced by the shell core, the API client and configuration.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Unknown domain '{0}'. Type 'help' for available commands")]
    UnknownDomain(String),

    #[error("Unknown resource type '{resource_type}' in domain '{domain}'")]
    UnknownResourceType {
        domain: String,
        resource_type: String,
    },

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("API client not configured: set F5XC_API_URL or run with --config")]
    NotConfigured,

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ShellError {
    fn from(err: reqwest::Error) -> Self {
        ShellError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ShellError {
    fn from(err: serde_yaml::Error) -> Self {
        ShellError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for ShellError {
    fn from(err: config::ConfigError) -> Self {
        ShellError::ConfigError(err.to_string())
    }
}

impl ShellError {
    /// Process exit code for a failed command.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::Usage(_) | ShellError::UnknownDomain(_) => 2,
            ShellError::UnknownResourceType { .. } => 2,
            ShellError::NotConfigured | ShellError::ConfigError(_) => 3,
            ShellError::ApiError { status, .. } if *status == 401 || *status == 403 => 4,
            ShellError::ApiError { status: 404, .. } => 5,
            _ => 1,
        }
    }
}
