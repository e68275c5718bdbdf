//! Demo user database model

use sqlx::FromRow;

/// Database model for the demo table
#[derive(Debug, Clone, FromRow)]
pub struct DemoUserModel {
    pub id: i64,
    pub username: String,
}
