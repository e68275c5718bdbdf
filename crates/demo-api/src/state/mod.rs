//! Application state
//!
//! Holds the shared state for the Axum application: the user repository and
//! the configuration. Never a connection, so none can outlive a request.

use std::sync::Arc;

use demo_common::AppConfig;
use demo_core::DemoUserRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    repo: Arc<dyn DemoUserRepository>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(repo: Arc<dyn DemoUserRepository>, config: AppConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }

    pub fn repo(&self) -> &dyn DemoUserRepository {
        self.repo.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("repo", &"DemoUserRepository")
            .field("config", &self.config)
            .finish()
    }
}
