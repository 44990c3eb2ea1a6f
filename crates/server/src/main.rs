//! Proof server entry point.
use anyhow::{Context, Result};
use proof_bridge::Bridge;
use proof_server::{ServerConfig, logging};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env()?;
    let _guard = logging::setup_logging(&config)?;

    let bridge = Bridge::from_config(&config.bridge);
    if !bridge.has_prover() {
        info!("External prover disabled, every proof will be simulated");
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Proof server running on http://{}", listener.local_addr()?);

    axum::serve(listener, proof_server::app(bridge))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proof server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
