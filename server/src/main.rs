//! `wamock` Server - Main Entry Point

use anyhow::Result;
use tracing::{info, warn};

use wamock_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting wamock server"
    );

    // Build application state
    let state = api::AppState::from_config(&config)?;
    let webhooks = state.webhooks.clone();

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    // Let in-flight webhook sequences finish
    let pending = webhooks.in_flight();
    if webhooks.drain(config.shutdown_drain).await {
        info!(pending, "Webhook sequences drained");
    } else {
        warn!(
            remaining = webhooks.in_flight(),
            "Webhook sequences still running at shutdown"
        );
    }

    info!("Server shutdown complete");

    Ok(())
}
