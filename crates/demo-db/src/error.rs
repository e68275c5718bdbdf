//! Database layer errors

use demo_core::DomainError;
use thiserror::Error;

/// Errors raised while building the pool, bootstrapping the schema or
/// checking connections out
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool settings or connect target rejected before connecting
    #[error("Invalid database configuration: {0}")]
    Config(String),

    /// Establishing a physical connection failed
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// The server rejected the per-connection session settings
    #[error("Session initialization failed: {0}")]
    Session(#[source] sqlx::Error),

    /// Every connection is checked out and the policy is fail-fast
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Every connection stayed checked out for the whole acquire timeout
    #[error("Timed out waiting for a pooled connection")]
    PoolTimedOut,

    #[error("Connection pool is closed")]
    PoolClosed,

    /// Schema reset failed for a reason other than a missing table
    #[error("Schema bootstrap failed: {0}")]
    Bootstrap(#[source] sqlx::Error),
}

impl DbError {
    /// Classify an error returned by `Pool::acquire`
    pub(crate) fn from_acquire(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::PoolTimedOut,
            sqlx::Error::PoolClosed => Self::PoolClosed,
            other => Self::Connect(other),
        }
    }

    /// True when no connection could be handed out in time
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::PoolExhausted | Self::PoolTimedOut)
    }
}

impl From<DbError> for DomainError {
    fn from(err: DbError) -> Self {
        if err.is_exhausted() {
            DomainError::PoolExhausted
        } else {
            DomainError::DatabaseError(err.to_string())
        }
    }
}
