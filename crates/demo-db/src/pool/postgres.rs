//! PostgreSQL connection pool management

use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use demo_common::{ConnectTarget, DatabaseConfig, PoolConfig, PoolWaitPolicy};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::{Connection, Postgres};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tracing::{info, warn};

use super::session::SessionInitializer;
use crate::error::DbError;

/// `application_name` reported to the server
const APPLICATION_NAME: &str = "pool-demo";

/// Bounded pool of exclusive-use connections
///
/// Cheap to clone; all clones share the same underlying pool. Every checkout
/// holds one of `max_connections` permits, so exhaustion is judged by what is
/// checked out rather than by how many connections happen to be open.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: PgPool,
    permits: Arc<Semaphore>,
    wait_policy: PoolWaitPolicy,
    max_connections: u32,
    acquire_timeout: Duration,
    session: SessionInitializer,
}

/// A checked-out connection
///
/// Dropping it returns the connection to the pool and then frees its permit.
#[derive(Debug)]
pub struct PooledConnection {
    conn: PoolConnection<Postgres>,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

/// Point-in-time pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Open physical connections, including ones still being established
    pub size: u32,
    pub idle: u32,
    pub checked_out: u32,
    pub max: u32,
}

impl DbPool {
    fn new(inner: PgPool, config: &PoolConfig, session: SessionInitializer) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(config.max_connections as usize)),
            wait_policy: config.wait_policy,
            max_connections: config.max_connections,
            acquire_timeout: config.acquire_timeout,
            session,
        }
    }

    /// Check a connection out of the pool according to the wait policy
    pub async fn acquire(&self) -> Result<PooledConnection, DbError> {
        let permit = self.reserve().await?;
        // Holding a permit means fewer than `max` are checked out, so a
        // connection is idle, being returned, or can still be opened
        let conn = self
            .inner
            .acquire()
            .await
            .map_err(DbError::from_acquire)?;

        Ok(PooledConnection {
            conn,
            _permit: permit,
        })
    }

    /// Take a checkout slot
    async fn reserve(&self) -> Result<OwnedSemaphorePermit, DbError> {
        match self.wait_policy {
            PoolWaitPolicy::Wait => {
                let permit =
                    tokio::time::timeout(self.acquire_timeout, self.permits.clone().acquire_owned())
                        .await
                        .map_err(|_| DbError::PoolTimedOut)?;
                permit.map_err(|_| DbError::PoolClosed)
            }
            PoolWaitPolicy::FailFast => match self.permits.clone().try_acquire_owned() {
                Ok(permit) => Ok(permit),
                Err(TryAcquireError::NoPermits) => {
                    warn!(max = self.max_connections, "Connection pool exhausted");
                    Err(DbError::PoolExhausted)
                }
                Err(TryAcquireError::Closed) => Err(DbError::PoolClosed),
            },
        }
    }

    /// Close every pooled connection and reject further acquires
    ///
    /// Waits for checked-out connections to be returned first.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.permits.close();
        self.inner.close().await;
        info!("Database connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    pub fn status(&self) -> PoolStatus {
        let available = u32::try_from(self.permits.available_permits()).unwrap_or(u32::MAX);
        PoolStatus {
            size: self.inner.size(),
            idle: u32::try_from(self.inner.num_idle()).unwrap_or(u32::MAX),
            checked_out: self.max_connections.saturating_sub(available),
            max: self.max_connections,
        }
    }

    /// Physical connections that have run the session initializer
    pub fn sessions_initialized(&self) -> u64 {
        self.session.applied_count()
    }
}

/// Build connect options from credentials and the connect target
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DbError> {
    let options = match &config.target {
        ConnectTarget::Url(url) => PgConnectOptions::from_str(url)
            .map_err(|e| DbError::Config(format!("invalid connection URL: {e}")))?,
        ConnectTarget::HostPort {
            host,
            port,
            database,
        } => {
            let mut options = PgConnectOptions::new().host(host);
            if let Some(port) = port {
                options = options.port(*port);
            }
            if let Some(database) = database {
                options = options.database(database);
            }
            options
        }
    };

    Ok(options
        .username(&config.username)
        .password(&config.password)
        .application_name(APPLICATION_NAME))
}

/// Open one standalone connection and run the session settings on it
///
/// Surfaces bad credentials or rejected session settings with the server's
/// own error instead of a pool timeout.
async fn check_session(
    options: &PgConnectOptions,
    session: &SessionInitializer,
) -> Result<(), DbError> {
    let mut conn = PgConnection::connect_with(options)
        .await
        .map_err(DbError::Connect)?;
    let result = session.run(&mut conn).await.map_err(DbError::Session);
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close session check connection");
    }
    result
}

/// Create the connection pool and open its first connection
///
/// The session initializer built from `config.session` runs on every new
/// physical connection. Idle connections are never retired, so connections
/// live until [`DbPool::close`].
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, DbError> {
    let pool_config = &config.pool;
    pool_config
        .validate()
        .map_err(|e| DbError::Config(e.to_string()))?;

    let options = connect_options(config)?;
    let session = SessionInitializer::from(&config.session);

    info!(
        database = %config.target,
        min = pool_config.min_connections,
        max = pool_config.max_connections,
        increment = pool_config.increment,
        wait_policy = %pool_config.wait_policy,
        "Creating connection pool"
    );

    check_session(&options, &session).await?;

    let hook = session.clone();
    let inner = PgPoolOptions::new()
        .min_connections(pool_config.min_connections)
        .max_connections(pool_config.max_connections)
        .acquire_timeout(pool_config.acquire_timeout)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .after_connect(move |conn, _meta| {
            let hook = hook.clone();
            Box::pin(async move { hook.apply(conn).await })
        })
        .connect_with(options)
        .await
        .map_err(DbError::Connect)?;

    info!("Connection pool established");

    Ok(DbPool::new(inner, pool_config, session))
}
