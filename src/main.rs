use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use codeshot::server::{self, AppState};
use codeshot::RunMode;

/// Codeshot render server
#[derive(Parser, Debug)]
#[command(name = "codeshot")]
#[command(version)]
#[command(about = "Codeshot — render code snippets to PNG via headless Chrome")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Deployment mode; selects the preview-page hostname
    #[arg(short, long, value_enum, default_value = "development")]
    mode: RunMode,

    /// Override the preview-page host for either mode
    #[arg(long)]
    preview_host: Option<String>,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// Seconds to wait for the preview page to signal readiness
    #[arg(long, default_value = "15")]
    ready_timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let preview_host = args
        .preview_host
        .unwrap_or_else(|| args.mode.preview_host().to_string());

    let state = Arc::new(AppState {
        preview_host: preview_host.clone(),
        ready_timeout: Duration::from_secs(args.ready_timeout),
        chrome_path: args.chrome_path,
    });

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("codeshot listening on {}", addr);
    tracing::info!("preview host: {}", preview_host);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler");
    }
}
