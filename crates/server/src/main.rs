use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use matchcount_core::upstream::HttpTransport;
use matchcount_server::{AppState, Config, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let config = Config::parse();
    tracing::info!(address = %config.address(), upstream = %config.upstream_url, "starting");

    let transport = HttpTransport::new(config.client_config())
        .context("Failed to create upstream client")?;
    let state = AppState::new(Arc::new(transport), config.counter_config());

    let socket_addr: SocketAddr = config
        .address()
        .parse()
        .context("Invalid listen address")?;
    let listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind {socket_addr}"))?;

    tracing::info!("API started at http://{}", socket_addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server stopped")?;

    tracing::info!("finished");
    Ok(())
}
