//! Error types for Redline
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Redline
#[derive(Debug, Error)]
pub enum RedlineError {
    /// Referenced document, paragraph, rule, or violation does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input to an operation (empty batch, blank document, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// LLM gateway failure of any kind (network, HTTP status, timeout)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// LLM output could not be parsed into the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RedlineError {
    /// NotFound for an entity/id pair, formatted consistently.
    pub fn not_found(entity: &str, id: i64) -> Self {
        RedlineError::NotFound(format!("{} {}", entity, id))
    }
}

/// Result type alias for Redline operations
pub type Result<T> = std::result::Result<T, RedlineError>;
