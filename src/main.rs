use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mini_search::api::{AppState, create_router};
use mini_search::client::ApiClient;
use mini_search::config::{ApiConfig, CONFIG};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mini-search", about = "Web front-end for the Mini Search engine")]
struct Args {
    /// Origin of the search backend (overrides API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Address to listen on (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Per-request backend timeout in milliseconds (overrides API_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Directory holding the stylesheet (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber, defaulting to info
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    // Bridge log crate -> tracing (reqwest logs through `log`)
    tracing_log::LogTracer::init().context("Failed to bridge log records")?;

    let args = Args::parse();

    let base_url = args.api_base_url.as_deref().unwrap_or(&CONFIG.api_base_url);
    let timeout = args
        .timeout_ms
        .or(CONFIG.api_timeout_ms)
        .map(Duration::from_millis);
    let api_config = ApiConfig::new(base_url, timeout).context("Invalid backend configuration")?;

    let client = ApiClient::new(api_config).context("Failed to create API client")?;
    match client.health_check().await {
        Ok(()) => tracing::info!(backend = %client.config().base_url, "backend is healthy"),
        Err(e) => tracing::warn!(
            backend = %client.config().base_url,
            "backend health check failed: {:#}",
            e
        ),
    }

    let static_dir = args.static_dir.as_deref().unwrap_or(&CONFIG.static_dir);
    let app = create_router(AppState::new(client), static_dir);

    let bind = args.bind.as_deref().unwrap_or(&CONFIG.bind_addr);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown requested");
                trigger.cancel();
            }
            Err(e) => tracing::error!("failed to listen for ctrl-c: {}", e),
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Server error")?;

    Ok(())
}
