//! Prompt proxy entry point.
//!
//! Loads configuration (TOML file plus environment overlay), initializes
//! tracing, binds the listener, and serves until Ctrl+C.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reprompt_proxy::config::load_config;
use reprompt_proxy::http::HttpServer;
use reprompt_proxy::upstream::{resolve, EndpointMode};

#[derive(Parser, Debug)]
#[command(name = "reprompt-proxy", about = "Backend proxy for the Anthropic Messages API")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 127.0.0.1:3000).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reprompt_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    let mode = resolve(&config.upstream).mode;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_mode = ?mode,
        rate_limit_enabled = config.rate_limit.enabled,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );
    if mode == EndpointMode::Unconfigured {
        tracing::warn!(
            "No upstream configured; set AI_GATEWAY_URL (plus gateway key) or ANTHROPIC_API_KEY"
        );
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
