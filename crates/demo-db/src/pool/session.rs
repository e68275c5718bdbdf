//! Per-connection session setup
//!
//! The pool runs the initializer once on every physical connection it opens,
//! before that connection is handed to any caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use demo_common::SessionConfig;
use sqlx::postgres::PgConnection;
use sqlx::Executor;
use tracing::debug;

/// Session settings applied in a single round trip
#[derive(Debug, Clone)]
pub struct SessionInitializer {
    time_zone: String,
    date_style: String,
    applied: Arc<AtomicU64>,
}

impl SessionInitializer {
    pub fn new(time_zone: impl Into<String>, date_style: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            date_style: date_style.into(),
            applied: Arc::new(AtomicU64::new(0)),
        }
    }

    /// All settings as one batched simple-query string
    pub fn statement(&self) -> String {
        format!(
            "SET TIME ZONE '{}'; SET DateStyle = '{}'",
            quote_literal(&self.time_zone),
            quote_literal(&self.date_style)
        )
    }

    /// Apply the settings to a freshly opened pooled connection
    pub async fn apply(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        self.run(conn).await?;
        let count = self.applied.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(
            time_zone = %self.time_zone,
            date_style = %self.date_style,
            initialized = count,
            "Session initialized"
        );
        Ok(())
    }

    /// Execute the settings without counting the connection as initialized
    pub(crate) async fn run(&self, conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        conn.execute(sqlx::raw_sql(&self.statement())).await?;
        Ok(())
    }

    /// Number of physical connections initialized so far
    pub fn applied_count(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }
}

impl Default for SessionInitializer {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for SessionInitializer {
    fn from(config: &SessionConfig) -> Self {
        Self::new(&config.time_zone, &config.date_style)
    }
}

fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}
