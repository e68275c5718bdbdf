//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, ConnectTarget, DatabaseConfig, Environment, PoolConfig,
    PoolWaitPolicy, ServerConfig, SessionConfig, DB_CONNECT_STRING_VAR, DB_PASSWORD_VAR,
    DB_USERNAME_VAR,
};
