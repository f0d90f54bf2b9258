// src/error.rs

//! Unified error handling for the curator.

use std::fmt;

use thiserror::Error;

/// Result type alias for curator operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Snapshot backend error (S3 and friends)
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Mirror answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body did not have the expected shape
    #[error("Unexpected response from {context}: {message}")]
    Schema { context: String, message: String },

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A retried unit of work ran out of attempts
    #[error("{context} failed after {attempts} attempts: {last}")]
    RetryExhausted {
        context: String,
        attempts: u32,
        last: Box<AppError>,
    },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a schema error with context.
    pub fn schema(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Schema {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a storage backend error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// Transport and schema failures are the ones worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Json(_) | Self::Schema { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
