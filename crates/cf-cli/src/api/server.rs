//! API Server setup

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::Config;
use crate::api::routes::create_router;
use crate::api::state::AppState;

/// Run the API server until Ctrl-C.
pub async fn run_server(config: &Config, state: AppState) -> Result<()> {
    let router = create_router(state, config.enable_cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "carbon footprint API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
