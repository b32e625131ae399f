//! Serve the in-memory backend over RPC

use anyhow::{Context, Result};
use backend::{LoopbackBackend, RpcServer};
use badge_core::dates;
use cli_lib::AppConfig;
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub async fn run(config: &AppConfig, addr: Option<String>) -> Result<()> {
    let addr = addr.unwrap_or_else(|| config.backend.address.clone());
    let backend = Arc::new(LoopbackBackend::new());

    let server = RpcServer::bind(&addr, backend.clone())
        .await
        .with_context(|| format!("Failed to listen on {}", addr))?;
    let local = server.local_addr().context("Failed to read listen address")?;
    println!("{} Backend listening on {}", "✓".green(), local.to_string().cyan());

    let purge = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            backend.purge_expired(dates::today());
        }
    });

    let result = tokio::select! {
        result = server.serve() => result.context("Backend server failed"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Shutting down");
            Ok(())
        }
    };

    purge.abort();
    result
}
