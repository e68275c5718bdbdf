//! Server setup and initialization
//!
//! Startup order: connection pool, schema bootstrap, then the listener. Any
//! failure before the listener is bound is fatal.

use std::sync::Arc;

use axum::Router;
use demo_common::{AppConfig, AppError, DatabaseConfig};
use demo_db::{bootstrap, create_pool, DbPool, PgDemoUserRepository};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Create the connection pool and reset the demo table
pub async fn init_database(config: &DatabaseConfig) -> Result<DbPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(config).await.map_err(AppError::database)?;
    info!("PostgreSQL connection established");

    if let Err(e) = bootstrap(&pool).await {
        pool.close().await;
        return Err(AppError::database(e));
    }

    Ok(pool)
}

/// Wire the repository over `pool` into the shared state
pub fn create_app_state(config: AppConfig, pool: DbPool) -> AppState {
    let repo = Arc::new(PgDemoUserRepository::new(pool));
    AppState::new(repo, config)
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::internal)?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.server.address();

    let pool = init_database(&config.database).await?;
    let state = create_app_state(config, pool.clone());
    let app = create_app(state);

    let result = run_server(app, &address).await;

    pool.close().await;
    result
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
