//! Repository traits (ports) - define the interface for data access
//!
//! Handlers depend on these traits only, so they can be exercised against an
//! in-memory implementation. The infrastructure layer provides the PostgreSQL
//! implementation.

use async_trait::async_trait;

use crate::entities::{DemoUser, NewDemoUser};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Demo User Repository
// ============================================================================

/// Every method holds at most one pooled connection, and only for the
/// duration of the call.
#[async_trait]
pub trait DemoUserRepository: Send + Sync {
    /// Insert a user and return it with its database-generated id
    async fn create(&self, user: &NewDemoUser) -> RepoResult<DemoUser>;

    /// Find a user by its generated id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<DemoUser>>;

    /// Check a connection out of the pool and return it immediately
    async fn ping(&self) -> RepoResult<()>;
}
