//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    // =========================================================================
    // Pool Errors
    // =========================================================================
    /// No connection could be handed out: the pool is fully checked out and
    /// either the policy is fail-fast or the bounded wait expired.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::PoolExhausted => "POOL_EXHAUSTED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidUsername(_))
    }

    /// Check if the pool could not supply a connection
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::PoolExhausted)
    }
}
