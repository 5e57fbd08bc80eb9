//! Faro - project portfolio assistant service
//!
//! HTTP service that answers natural-language questions about an
//! organizational project catalog, in Spanish.
//!
//! # Usage
//!
//! ```bash
//! # Local answers only (no credential needed)
//! cargo run --release
//!
//! # Provider-backed answers
//! OPENAI_API_KEY=sk-... cargo run --release
//!
//! # Custom port and dataset
//! cargo run --release -- --port 8080 --data ./data/projects.json
//! ```
//!
//! # Environment Variables
//!
//! - `PORT`: Bind port (default: 3000)
//! - `OPENAI_API_KEY`: Provider credential; when unset, answers come from local data
//! - `FARO_MODEL`: Provider model id (default: gpt-4o-mini)
//! - `FARO_OPENAI_BASE_URL`: OpenAI-compatible API base (default: https://api.openai.com/v1)
//! - `FARO_DATA_PATH`: Dataset path (default: data/projects.json)
//! - `FARO_LLM_TIMEOUT_SECS`: Provider timeout in seconds (default: 30)
//! - `FARO_CORS_ORIGINS`: Comma-separated allowed origins (default: same-origin only)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use faro::api::{create_app, AppState};
use faro::catalog::Catalog;
use faro::chat::ChatEngine;
use faro::config::Config;
use faro::llm;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "faro")]
#[command(about = "Faro project portfolio assistant")]
#[command(version)]
struct CliArgs {
    /// Port to listen on (default: PORT env var or 3000)
    #[arg(long, short)]
    port: Option<u16>,

    /// Path to the projects dataset (default: FARO_DATA_PATH or data/projects.json)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,
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
    let config = Config::from_env(args.port, args.data);

    let catalog = Catalog::load_or_empty(&config.data_path);
    let provider = llm::provider_from_config(&config);
    let engine = Arc::new(ChatEngine::new(catalog.clone(), provider));

    let state = AppState { catalog, engine };
    let app = create_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("🌐 Starting HTTP server on {}...", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("✓ HTTP server listening on {}", addr);
    info!("🎯 Front-end available at: http://localhost:{}", config.port);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}
