//! # demo-api
//!
//! HTTP server built with the Axum framework: three plain-text demo routes
//! over a pooled PostgreSQL connection, plus liveness and readiness checks.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, init_database, run, run_server};
pub use state::AppState;
