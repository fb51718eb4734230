//! OrderBridge - forwards assistant orders to Exact Online
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use orderbridge_api::utils::logging::init_tracing;
use orderbridge_api::{router, AppContext};
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Read .env before the subscriber so RUST_LOG from the file applies.
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }

    let config = orderbridge_infra::config::load().context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let context = Arc::new(AppContext::new(config).context("failed to initialise application")?);

    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "OrderBridge listening");

    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    info!("OrderBridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
