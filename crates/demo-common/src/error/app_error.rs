//! Application error types
//!
//! Startup failures carried up to `main`. Request-level errors are mapped by
//! the API crate.

use serde::Serialize;

/// Fatal error raised while starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors (including an unusable listen address)
    #[error("Configuration error: {0}")]
    Config(String),

    // Pool construction or schema bootstrap
    #[error("Database initialization failed")]
    Database(#[source] anyhow::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Wrap a database-layer error, keeping it as the source
    pub fn database(err: impl Into<anyhow::Error>) -> Self {
        Self::Database(err.into())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
