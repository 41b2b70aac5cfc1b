//! WGC-BC - Wet-Gas Compressor Boundary-Condition Service
//!
//! Ingests compressor telemetry over HTTP and synthesizes OpenFOAM
//! boundary conditions from steady windows of it.
//!
//! # Usage
//!
//! ```bash
//! # Serve on the configured address (default 0.0.0.0:5050)
//! ./wgc-bc --config wgc_bc.toml
//!
//! # Offline: samples file -> bc_case.json
//! ./wgc-bc export --input samples.json --output bc_case.json --window 120
//!
//! # Show the effective configuration
//! ./wgc-bc print-config
//! ```
//!
//! # Environment Variables
//!
//! - `WGC_CONFIG`: Path to the TOML config file
//! - `WGC_SERVER_ADDR`: Override the server address
//! - `WGC_CORS_ORIGINS`: Comma-separated allowed CORS origins (default: any)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use wgc_bc::api::{create_app, ApiState};
use wgc_bc::bc::{export_case_file, CASE_FILE_NAME};
use wgc_bc::config::ServiceConfig;
use wgc_bc::pipeline::PipelineContext;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wgc-bc")]
#[command(about = "Wet-gas compressor telemetry to CFD boundary conditions")]
#[command(version)]
struct CliArgs {
    /// Path to the TOML config file (overrides WGC_CONFIG and ./wgc_bc.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:5050")
    #[arg(short, long, value_name = "HOST:PORT", env = "WGC_SERVER_ADDR")]
    addr: Option<String>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP service (default)
    Serve,

    /// Synthesize a BC case file from a JSON array of samples
    Export {
        /// JSON file holding one sample object or an array of them
        #[arg(long)]
        input: PathBuf,
        /// Case file to write
        #[arg(long, default_value = CASE_FILE_NAME)]
        output: PathBuf,
        /// Trailing samples to use (default: history.recommend_default)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Print the effective configuration as TOML
    PrintConfig,
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_export(config: &ServiceConfig, input: &Path, output: &Path, window: Option<usize>) -> Result<()> {
    let pipeline = PipelineContext::new(config);
    let summary = export_case_file(&pipeline, input, output, window)?;
    info!(
        window = summary.window_samples,
        skipped = summary.skipped.len(),
        steady_ok = summary.steady_ok,
        "Export complete"
    );
    Ok(())
}

async fn run_server(config: ServiceConfig, cancel_token: CancellationToken) -> Result<()> {
    let server_addr = config.server.addr.clone();

    info!(
        capacity = config.history.capacity,
        recommend_window = config.history.recommend_default,
        min_window = config.steady_state.min_window_samples,
        outlet_pressure_ratio = config.assumptions.outlet_pressure_ratio,
        "Pipeline configured"
    );

    let app = create_app(ApiState::new(config));

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;
    info!("HTTP server listening on {}", server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = ServiceConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    match args.command.unwrap_or(SubCommand::Serve) {
        SubCommand::PrintConfig => {
            print!("{}", config.to_toml().context("Failed to render configuration")?);
            Ok(())
        }
        SubCommand::Export { input, output, window } => run_export(&config, &input, &output, window),
        SubCommand::Serve => {
            info!("WGC-BC v{} starting", env!("CARGO_PKG_VERSION"));

            // Graceful shutdown via Ctrl+C
            let cancel_token = CancellationToken::new();
            let shutdown_token = cancel_token.clone();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("Received Ctrl+C, initiating shutdown...");
                shutdown_token.cancel();
            });

            run_server(config, cancel_token).await
        }
    }
}
