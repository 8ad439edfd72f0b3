//! # FXIB Backend
//!
//! Backend server for the FXIB trading community platform.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - SMTP, Stripe, and geolocation clients
//! - HTTP server

use anyhow::Result;
use tracing::info;

use fxib_backend::config::Settings;
use fxib_backend::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    fxib_backend::telemetry::init_tracing();

    info!("Starting FXIB backend...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
