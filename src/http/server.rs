//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the configured gateway mode
//! - Wire up middleware (tracing, timeout, request ID)
//! - Build the shared outbound HTTP client
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - One process serves exactly one handler; the other mode's routes do
//!   not exist in its router
//! - Both handlers share a single connection-pooling outbound client
//! - The outbound client carries a bounded timeout as a hardening
//!   measure; the inbound timeout is longer so upstream faults surface
//!   through the handlers rather than the timeout middleware

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::{GatewayConfig, GatewayMode, TimeoutConfig, UpstreamConfig};
use crate::config::CredentialBundle;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::{forward, resolve};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub upstream: UpstreamConfig,
    pub credentials: Arc<CredentialBundle>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and
    /// credentials.
    pub fn new(
        config: GatewayConfig,
        credentials: CredentialBundle,
    ) -> Result<Self, reqwest::Error> {
        let client = build_client(&config.timeouts)?;

        let state = AppState {
            client,
            upstream: config.upstream.clone(),
            credentials: Arc::new(credentials),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = match config.mode {
            GatewayMode::Forward => Router::new()
                .route("/", any(forward::forward_handler))
                .route("/{*path}", any(forward::forward_handler)),
            GatewayMode::Resolve => Router::new()
                .route("/play.m3u8", get(resolve::resolve_handler))
                .fallback(not_found),
        };

        routes.with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Fallback for resolve mode. Any path other than the manifest route is
/// explicitly not found.
async fn not_found(method: Method) -> impl IntoResponse {
    metrics::record_request(
        method.as_str(),
        StatusCode::NOT_FOUND.as_u16(),
        "resolve",
        Instant::now(),
    );
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Shared outbound client. The bounded timeout is a hardening measure;
/// redirects are followed so the final redirected response is what gets
/// relayed.
fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.upstream_secs))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
}
