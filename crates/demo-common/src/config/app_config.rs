//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Database user name
pub const DB_USERNAME_VAR: &str = "DEMO_DB_USERNAME";
/// Database password
pub const DB_PASSWORD_VAR: &str = "DEMO_DB_PASSWORD";
/// `host[:port][/database]` or a `postgres://` URL
pub const DB_CONNECT_STRING_VAR: &str = "DEMO_DB_CONNECT_STRING";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Read `APP_ENV` (loading `.env` first), defaulting to development
    ///
    /// Lets the binary pick a log format before the full config is loaded.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        env::var("APP_ENV")
            .ok()
            .and_then(|s| Self::parse(&s))
            .unwrap_or_default()
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database credentials, target, pool sizing and session settings
#[derive(Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub target: ConnectTarget,
    pub pool: PoolConfig,
    pub session: SessionConfig,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("target", &self.target)
            .field("pool", &self.pool)
            .field("session", &self.session)
            .finish()
    }
}

/// Where the database lives
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectTarget {
    /// A full `postgres://` / `postgresql://` URL. Credentials from the
    /// dedicated variables override any embedded in the URL.
    Url(String),
    /// Easy-connect form: `host[:port][/database]`
    HostPort {
        host: String,
        port: Option<u16>,
        database: Option<String>,
    },
}

impl fmt::Debug for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // URLs may embed a password
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::HostPort {
                host,
                port,
                database,
            } => f
                .debug_struct("HostPort")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .finish(),
        }
    }
}

impl fmt::Display for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("<url>"),
            Self::HostPort {
                host,
                port,
                database,
            } => {
                if host.contains(':') {
                    write!(f, "[{host}]")?;
                } else {
                    f.write_str(host)?;
                }
                if let Some(port) = port {
                    write!(f, ":{port}")?;
                }
                if let Some(database) = database {
                    write!(f, "/{database}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ConnectTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            return Ok(Self::Url(s.to_string()));
        }

        let (authority, database) = match s.split_once('/') {
            Some((authority, db)) if db.is_empty() => (authority, None),
            Some((authority, db)) => (authority, Some(db.to_string())),
            None => (s, None),
        };

        // Bracketed IPv6 literal: [::1]:5432
        let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
            let (host, after) = rest
                .split_once(']')
                .ok_or_else(|| "unterminated '[' in host".to_string())?;
            match after {
                "" => (host, None),
                p => (
                    host,
                    Some(
                        p.strip_prefix(':')
                            .ok_or_else(|| format!("unexpected '{p}' after host"))?,
                    ),
                ),
            }
        } else {
            match authority.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            }
        };

        if host.is_empty() {
            return Err("host is empty".to_string());
        }

        let port = port
            .map(|p| p.parse::<u16>().map_err(|_| format!("invalid port '{p}'")))
            .transpose()?;

        Ok(Self::HostPort {
            host: host.to_string(),
            port,
            database,
        })
    }
}

/// Pool sizing and exhaustion policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    /// Connections to add per growth step. Must be 0 for a fixed-size pool.
    pub increment: u32,
    pub wait_policy: PoolWaitPolicy,
    /// Upper bound on a blocking wait for a connection
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: default_pool_size(),
            max_connections: default_pool_size(),
            increment: 0,
            wait_policy: PoolWaitPolicy::Wait,
            acquire_timeout: Duration::from_secs(default_acquire_timeout_secs()),
        }
    }
}

impl PoolConfig {
    /// Check the sizing attributes for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DB_POOL_MAX",
                "must be at least 1".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::InvalidValue(
                "DB_POOL_MIN",
                format!(
                    "{} exceeds DB_POOL_MAX ({})",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        let headroom = self.max_connections - self.min_connections;
        if headroom == 0 && self.increment != 0 {
            return Err(ConfigError::InvalidValue(
                "DB_POOL_INCREMENT",
                "must be 0 when DB_POOL_MIN equals DB_POOL_MAX".to_string(),
            ));
        }
        if headroom > 0 && !(1..=headroom).contains(&self.increment) {
            return Err(ConfigError::InvalidValue(
                "DB_POOL_INCREMENT",
                format!("must be between 1 and {headroom}"),
            ));
        }
        Ok(())
    }
}

/// What `acquire` does when every connection is checked out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolWaitPolicy {
    /// Block until a connection is released (bounded by the acquire timeout)
    #[default]
    Wait,
    /// Fail immediately with a pool-exhausted error
    FailFast,
}

impl FromStr for PoolWaitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wait" | "block" => Ok(Self::Wait),
            "fail-fast" | "failfast" | "nowait" => Ok(Self::FailFast),
            other => Err(format!("unknown policy '{other}' (expected wait or fail-fast)")),
        }
    }
}

impl fmt::Display for PoolWaitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wait => f.write_str("wait"),
            Self::FailFast => f.write_str("fail-fast"),
        }
    }
}

/// Per-connection session settings applied once by the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub time_zone: String,
    pub date_style: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            date_style: default_date_style(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "pool-demo".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_pool_size() -> u32 {
    4
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_date_style() -> String {
    "ISO, YMD".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// any value fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let connect_string = required(&get, DB_CONNECT_STRING_VAR)?;
        let target = connect_string
            .parse::<ConnectTarget>()
            .map_err(|e| ConfigError::InvalidValue(DB_CONNECT_STRING_VAR, e))?;

        let pool = PoolConfig {
            min_connections: parsed(&get, "DB_POOL_MIN", default_pool_size())?,
            max_connections: parsed(&get, "DB_POOL_MAX", default_pool_size())?,
            increment: parsed(&get, "DB_POOL_INCREMENT", 0)?,
            wait_policy: parsed(&get, "DB_POOL_WAIT", PoolWaitPolicy::default())?,
            acquire_timeout: Duration::from_secs(parsed(
                &get,
                "DB_POOL_ACQUIRE_TIMEOUT_SECS",
                default_acquire_timeout_secs(),
            )?),
        };
        pool.validate()?;

        Ok(Self {
            app: AppSettings {
                name: get("APP_NAME").unwrap_or_else(default_app_name),
                env: get("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(default_host),
                port: parsed(&get, "PORT", default_port())?,
            },
            database: DatabaseConfig {
                username: required(&get, DB_USERNAME_VAR)?,
                password: required(&get, DB_PASSWORD_VAR)?,
                target,
                pool,
                session: SessionConfig {
                    time_zone: get("DB_SESSION_TIME_ZONE").unwrap_or_else(default_time_zone),
                    date_style: get("DB_SESSION_DATE_STYLE").unwrap_or_else(default_date_style),
                },
            },
        })
    }
}

fn required<F>(get: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).ok_or(ConfigError::MissingVar(key))
}

fn parsed<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(key, format!("'{raw}': {e}"))),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
