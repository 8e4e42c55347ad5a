//! momo-server - memory generation service
//!
//! Serves the JSON API and the two embedded pages. Configuration comes from
//! `momo.toml`, then `MOMO_*` environment variables, then the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use momo_common::config::MomoConfig;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use momo_server::{build_router, logging, AppState};

#[derive(Parser, Debug)]
#[command(name = "momo-server")]
#[command(
    about = "Turns remembered moments into poems, images, music and narration"
)]
#[command(version)]
struct Args {
    /// Path to momo.toml (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "MOMO_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MOMO_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (subscriber, log_control) = logging::subscriber(EnvFilter::try_from_default_env().ok());
    subscriber.init();

    let mut config =
        MomoConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    log_control
        .apply_level(&config.logging.level)
        .context("Failed to apply configured log level")?;

    info!("Starting momo-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_status();

    let bind = (config.host.clone(), config.port);
    let state = AppState::from_config(config).context("Failed to initialize services")?;
    info!(
        poem = state.coordinator.poem_stage().service(),
        music = state.coordinator.music_stage().service(),
        image = state.coordinator.image_stage().service(),
        tts = state.speech.service(),
        server_side_mixing = state.mixer.server_side_available(),
        "Services initialized"
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((bind.0.as_str(), bind.1))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", bind.0, bind.1))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
