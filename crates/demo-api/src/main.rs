//! Demo API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p demo-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use demo_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    let tracing_config = TracingConfig::for_environment(Environment::from_env());
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        // Alternate form includes the whole source chain
        let message = format!("{e:#}");
        error!(error = %message, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Demo API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        address = %config.server.address(),
        "Configuration loaded"
    );

    demo_api::run(config).await?;

    Ok(())
}
