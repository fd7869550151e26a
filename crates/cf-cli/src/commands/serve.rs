//! Serve command for running the HTTP API.

use anyhow::{Context, Result};
use cf_db::Database;

use crate::Config;
use crate::api::{AppState, run_server};

/// Runs the API server on a multi-threaded runtime until interrupted.
pub fn run(config: &Config, db: Database) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let state = AppState::new(db);
    runtime.block_on(run_server(config, state))
}
