//! device-agent: loopback HTTP service reporting the machine's network
//! interface inventory.
//!
//! Run with: `device-agent` (binds 127.0.0.1, port from config.json or 18888)

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use device_agent::config::ServiceConfig;
use device_agent::{server, APP_VERSION, SHUTDOWN_GRACE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::load();
    // Loopback only: the API is unauthenticated and must never be reachable
    // from another host.
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));

    // Deferred exit: /api/exit signals this task, which gives the in-flight
    // acknowledgment time to flush and then terminates. Irreversible once
    // signaled; exit code 0.
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if shutdown_rx.recv().await.is_some() {
            tracing::info!("exit requested, stopping service");
            tokio::time::sleep(SHUTDOWN_GRACE).await;
            std::process::exit(0);
        }
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("device agent started");
    tracing::info!("listening on {addr}");
    tracing::info!("os: {} | version: {}", std::env::consts::OS, APP_VERSION);

    axum::serve(listener, server::router(shutdown_tx))
        .await
        .context("http server terminated unexpectedly")?;

    Ok(())
}
