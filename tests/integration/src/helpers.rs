//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and checking responses.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use demo_api::{create_app, create_app_state, init_database};
use demo_common::{AppConfig, DB_CONNECT_STRING_VAR, DB_PASSWORD_VAR, DB_USERNAME_VAR};
use demo_db::DbPool;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Every server resets the shared `demo` table, so only one runs at a time
static SERVER_LOCK: Mutex<()> = Mutex::const_new(());

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: DbPool,
    handle: JoinHandle<()>,
    _guard: MutexGuard<'static, ()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let guard = SERVER_LOCK.lock().await;

        // Pool + bootstrap, exactly as the binary does
        let pool = init_database(&config.database).await?;
        let state = create_app_state(config, pool.clone());
        let app = create_app(state);

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            pool,
            handle,
            _guard: guard,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// GET a path and return its plain-text body, requiring 200
    pub async fn get_text(&self, path: &str) -> Result<String> {
        assert_text(self.get(path).await?, StatusCode::OK).await
    }

    /// The pool backing this server
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Stop serving and close the pool
    pub async fn shutdown(self) {
        self.handle.abort();
        self.pool.close().await;
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in [DB_USERNAME_VAR, DB_PASSWORD_VAR, DB_CONNECT_STRING_VAR] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status and return the plain-text body
pub async fn assert_text(response: Response, expected_status: StatusCode) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(body)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    assert_text(response, expected_status).await.map(drop)
}
