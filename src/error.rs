//! Error types for the honeypot responder.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors delivering a report to the evaluation endpoint.
///
/// These never reach the caller of a turn; the dispatcher logs them at the
/// task boundary.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Endpoint {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
