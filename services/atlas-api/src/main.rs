//! Polygon weather color-classification service.
//!
//! Lets clients manage drawn polygons, data sources, and the active time
//! window, and keeps each polygon's display color resolved against the
//! historical weather archive.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use archive_client::{ArchiveClient, WeatherArchive};
use atlas_api::handlers;
use atlas_api::state::AppState;
use atlas_common::source::DEFAULT_ARCHIVE_URL;
use resolver::WindowMode;

#[derive(Parser, Debug)]
#[command(name = "atlas-api")]
#[command(about = "Polygon weather color-classification service")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "ATLAS_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Path of the persisted state blob
    #[arg(
        long,
        default_value = "weather-atlas-storage.json",
        env = "ATLAS_STATE_FILE"
    )]
    state_file: PathBuf,

    /// Fallback archive endpoint for sources without one
    #[arg(long, default_value = DEFAULT_ARCHIVE_URL, env = "ATLAS_ARCHIVE_URL")]
    archive_url: String,

    /// Bound aggregation: apply the window start as a lower bound instead
    /// of averaging everything up to the window end
    #[arg(long, env = "ATLAS_STRICT_WINDOW")]
    strict_window: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .init();

    info!("Starting atlas-api");

    let mode = if args.strict_window {
        WindowMode::Bounded
    } else {
        WindowMode::TrailingInclusive
    };

    let archive: Arc<dyn WeatherArchive> =
        Arc::new(ArchiveClient::new().context("Failed to create archive client")?);

    let state = Arc::new(
        AppState::new(archive, mode, args.archive_url, args.state_file)
            .await
            .context("Failed to initialize application state")?,
    );

    // Colors for restored polygons resolve in the background.
    state.refresh_all().await;

    let app = handlers::router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    info!(listen = %args.listen, "atlas-api listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
