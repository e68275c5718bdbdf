//! # demo-db
//!
//! Database layer for the demo service, backed by PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Bounded connection pool with a configurable exhaustion policy
//! - Session initializer run once on every new physical connection
//! - Startup schema bootstrap that resets the `demo` table
//! - `DemoUserRepository` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use demo_common::AppConfig;
//! use demo_db::{bootstrap, create_pool, PgDemoUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     bootstrap(&pool).await?;
//!     let repo = PgDemoUserRepository::new(pool.clone());
//!
//!     // Use the repository...
//!     pool.close().await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use error::DbError;
pub use pool::{
    connect_options, create_pool, DbPool, PoolStatus, PooledConnection, SessionInitializer,
};
pub use repositories::PgDemoUserRepository;
pub use schema::{bootstrap, is_undefined_table, DEMO_TABLE, SEED_USERNAME};
