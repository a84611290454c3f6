//! # URA Server
//!
//! Local export and preview server for URA projects.
//! Binds to localhost only.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use clap::Parser;
use ura_server::{metrics, router, telemetry, AppState, ServerArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    telemetry::init_tracing(args.log_format);

    let scrape = metrics::init_metrics().context("installing Prometheus recorder")?;
    let state = AppState::from_args(&args).context("configuring share uploads")?;
    if state.exporter().has_uploader() {
        tracing::info!(endpoint = %args.upload_url, "Share mode enabled");
    } else {
        tracing::info!("Share mode disabled");
    }

    let app = telemetry::instrument(
        router(state, args.max_body_bytes),
        &args.cors_origins(),
        scrape,
    );

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, max_body_bytes = args.max_body_bytes, "URA server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
