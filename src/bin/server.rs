//! Billetscan server - banknote authenticity inference API
//!
//! Serves a frozen classifier + feature-scaler bundle over HTTP. The
//! artifact is loaded once at startup; the process refuses to start
//! without it.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=data/model/billet_artifact.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `MODEL_PATH` - Path to the serialized model artifact
//! - `BIND_ADDRESS` / `PORT` - Listener address (default 0.0.0.0:8000)
//! - `MAX_BATCH_ROWS` - Reject larger prediction batches (0 disables the cap)

use anyhow::{Context, Result};
use billetscan::application::artifact::ModelArtifact;
use billetscan::config::Config;
use billetscan::interfaces::http::{AppState, build_router};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Billetscan {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Addr={}, Model={:?}, MaxBatchRows={}",
        config.bind_addr(),
        config.model_path,
        config.max_batch_rows
    );

    // No retries: without a valid artifact the service must not accept traffic.
    let artifact = ModelArtifact::load(&config.model_path)
        .with_context(|| format!("cannot start without a model artifact at {:?}", config.model_path))?;

    let state = AppState {
        artifact: Arc::new(artifact),
        max_batch_rows: config.max_batch_rows,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    info!("Listening on {}. Press Ctrl+C to shutdown.", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received. Exiting...");
}
