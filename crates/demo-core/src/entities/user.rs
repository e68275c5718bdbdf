//! Demo user entity - a row of the demo table

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Column width of `demo.username`, mirrored by the `length` rule on [`NewDemoUser`]
pub const USERNAME_MAX_LEN: usize = 40;

/// A stored demo user
///
/// `id` is always generated by the database at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUser {
    pub id: i64,
    pub username: String,
}

impl DemoUser {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Input for inserting a demo user. Carries no id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewDemoUser {
    #[validate(length(min = 1, max = 40, message = "Username must be 1-40 characters"))]
    pub username: String,
}

impl NewDemoUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
