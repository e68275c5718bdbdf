//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{demo, health};
use crate::state::AppState;

/// Create the router with the demo routes and the health checks
pub fn create_router() -> Router<AppState> {
    Router::new().merge(demo_routes()).merge(health_routes())
}

/// The three demo routes
fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(demo::index))
        .route("/post/:username", get(demo::post_user))
        .route("/user/:id", get(demo::show_username))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
