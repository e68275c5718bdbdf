//! Test fixtures and response shapes

use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A username no other test in this process uses
pub fn unique_username() -> String {
    format!("user{}", unique_suffix())
}

/// Parse the id out of `Inserted {username} with id {id}`
pub fn inserted_id(body: &str) -> Option<i64> {
    body.rsplit_once(" with id ")?.1.parse().ok()
}

/// Liveness response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness response
#[derive(Debug, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: bool,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_id() {
        assert_eq!(inserted_id("Inserted fred with id 2"), Some(2));
        assert_eq!(inserted_id("Inserted a with id b with id 17"), Some(17));
        assert_eq!(inserted_id("Unknown user id"), None);
    }
}
