//! HTTP Stream Gateway
//!
//! A small HTTP gateway built with Tokio and Axum, serving one of two
//! handlers per deployment:
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────┐
//!                       │                 STREAM GATEWAY                 │
//!                       │                                                │
//!    Client Request     │  ┌─────────┐      ┌─────────────────────────┐ │
//!    ───────────────────┼─▶│  http   │─────▶│ mode = forward:         │ │
//!                       │  │ server  │      │   forward handler       │─┼──▶ caller-specified
//!                       │  └─────────┘      │   (URL in request path) │ │    HTTPS origin
//!                       │                   │                         │ │
//!                       │                   │ mode = resolve:         │ │
//!                       │                   │   resolve handler       │─┼──▶ token endpoint
//!                       │                   │   (/play.m3u8?id=...)   │ │    POST /live/{id}/tokens
//!                       │                   └─────────────────────────┘ │
//!                       │                                                │
//!                       │  ┌──────────────────────────────────────────┐ │
//!                       │  │           Cross-Cutting Concerns          │ │
//!                       │  │  ┌────────┐ ┌───────────┐ ┌────────────┐ │ │
//!                       │  │  │ config │ │ observa-  │ │ lifecycle  │ │ │
//!                       │  │  │        │ │ bility    │ │  shutdown  │ │ │
//!                       │  │  └────────┘ └───────────┘ └────────────┘ │ │
//!                       │  └──────────────────────────────────────────┘ │
//!                       └───────────────────────────────────────────────┘
//! ```
//!
//! The two handlers share no state beyond the outbound HTTP client and the
//! read-only credential bundle loaded at startup.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stream_gateway::config::loader;
use stream_gateway::config::CredentialBundle;
use stream_gateway::{GatewayConfig, GatewayMode, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "stream-gateway")]
#[command(about = "HTTP gateway: generic HTTPS forwarder and HLS manifest resolver", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the gateway mode (forward or resolve).
    #[arg(short, long)]
    mode: Option<GatewayMode>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stream_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("stream-gateway v0.1.0 starting");

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }

    // Session credentials for the token endpoint. Missing variables become
    // empty strings; the upstream then rejects with 403.
    let credentials = CredentialBundle::from_env();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mode = %config.mode,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            stream_gateway::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Graceful shutdown on Ctrl+C / SIGTERM
    let shutdown = Shutdown::new();
    shutdown.spawn_signal_listener();

    // Create and run HTTP server
    let server = HttpServer::new(config, credentials)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
