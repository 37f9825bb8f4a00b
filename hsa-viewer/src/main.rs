//! hsa-viewer - read-only case-file workbook viewer
//!
//! Loads the workbook once at startup and serves it over HTTP until
//! interrupted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hsa_common::config::{resolve_workbook_path, TomlConfig};
use hsa_viewer::{build_router, db, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for hsa-viewer
#[derive(Parser, Debug)]
#[command(name = "hsa-viewer")]
#[command(about = "Read-only viewer for case-file workbooks")]
#[command(version)]
struct Args {
    /// Workbook file (SQLite, one table per sheet)
    #[arg(short, long)]
    workbook: Option<PathBuf>,

    /// Config file (defaults to ~/.config/hsa/config.toml)
    #[arg(short, long, env = "HSA_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `bind_address` from the config file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing is up; its level seeds the default filter
    let config = TomlConfig::load_or_default(args.config.as_deref());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting hsa-viewer v{}", env!("CARGO_PKG_VERSION"));

    let workbook_path = resolve_workbook_path(args.workbook.as_deref(), &config);
    info!("Workbook path: {}", workbook_path.display());

    let pool = db::connect_readonly(&workbook_path).await?;
    info!("✓ Opened workbook (read-only)");

    let workbook = db::load_workbook(&pool)
        .await
        .context("Failed to load workbook")?;
    pool.close().await;

    let total_records: usize = workbook.sheets.iter().map(|s| s.len()).sum();
    info!(
        "✓ Loaded {} sheets, {} records, {} distinct columns",
        workbook.sheets.len(),
        total_records,
        workbook.schema_universe().len()
    );

    let app = build_router(AppState::new(workbook));

    let bind_address = args.bind.unwrap_or(config.bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;
    info!("hsa-viewer listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
