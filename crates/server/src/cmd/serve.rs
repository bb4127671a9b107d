//! Serve command - run the Wafr server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tracing::info;

use wafr_api::{build_router, AppState};
use wafr_catalog::LiveCatalog;
use wafr_store::DataPlane;

use crate::cmd::load_config;

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file (defaults to configs/wafr.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let addr = config.server.bind_addr()?;

    let plane = if config.store.memory {
        info!("using in-memory store");
        DataPlane::new_memory().await?
    } else {
        info!(data_dir = %config.store.data_dir, "opening store");
        DataPlane::new(&config.store.data_dir).await?
    };
    let plane = Arc::new(plane);

    let catalog = Arc::new(LiveCatalog::spawn(
        Arc::clone(&plane),
        config.catalog.refresh_debounce(),
    ));

    if config.admin.token.is_none() {
        info!("no admin token configured; admin surface is disabled");
    }

    let state = AppState::new(plane, catalog, config.admin.token.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "wafr listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("received ctrl-c, shutting down");
    }
}
