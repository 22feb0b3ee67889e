//! Stash server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use stash_core::AppConfig;
use stash_server::{AppState, create_router};
use stash_spool::{Persister, SpoolQueue};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stash - a JSON capture endpoint
#[derive(Parser, Debug)]
#[command(name = "stashd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "STASH_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Stash v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. The file is optional: every field has a default and
    // STASH_ env vars can provide or override everything.
    let mut figment = Figment::new();
    let config_path = std::path::Path::new(&args.config);
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("STASH_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if config.origin.check_enabled {
        tracing::info!(origins = ?config.origin.allowlist, "Origin check enabled");
    } else {
        tracing::warn!("Origin check disabled, all origins accepted");
    }

    // Shared queue: the single mutable resource between handlers and the
    // persister. State construction validates the spool config before the
    // persister is spawned with it.
    let queue = Arc::new(SpoolQueue::new());
    let state = AppState::new(config.clone(), queue.clone());

    let persister = Persister::new(
        queue,
        &config.spool.output_dir,
        config.spool.flush_interval(),
    )
    .spawn();
    tracing::info!(
        output_dir = %config.spool.output_dir.display(),
        interval_secs = config.spool.flush_interval_secs,
        "Batch persister spawned"
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain whatever was accepted but not yet written.
    tracing::info!("Shutting down, flushing spool");
    persister.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
