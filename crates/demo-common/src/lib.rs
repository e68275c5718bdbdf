//! # demo-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, ConnectTarget, DatabaseConfig, Environment, PoolConfig,
    PoolWaitPolicy, ServerConfig, SessionConfig, DB_CONNECT_STRING_VAR, DB_PASSWORD_VAR,
    DB_USERNAME_VAR,
};
pub use error::{AppError, ErrorResponse};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
