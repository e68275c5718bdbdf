//! Database connection pool management

mod postgres;
mod session;

pub use postgres::{connect_options, create_pool, DbPool, PoolStatus, PooledConnection};
pub use session::SessionInitializer;
