//! Token-exchange resolver handler.
//!
//! # Responsibilities
//! - Validate the caller-supplied identifier
//! - Exchange it for a playback token via the upstream endpoint
//! - Emit a single-line HLS manifest pointing at the returned URL
//!
//! # Design Decisions
//! - Linear flow: validate id → request token → interpret → emit; no
//!   retry loop
//! - The identifier is substituted verbatim into the token URL and the
//!   `Referer` header, matching the upstream's expectations
//! - A single catch-all converts any fault (network, malformed JSON)
//!   into a 500 carrying the fault's message

use std::collections::HashMap;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Identity presented to the token endpoint.
const RESOLVER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

/// Content type of the emitted manifest.
const MANIFEST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// Exchange the `id` query parameter for a playback manifest URL.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let start = Instant::now();

    let response = match params.get("id").filter(|id| !id.is_empty()) {
        Some(id) => match request_token(&state, id).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Token exchange failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {}", e),
                )
                    .into_response()
            }
        },
        None => (StatusCode::BAD_REQUEST, "Missing id parameter").into_response(),
    };

    metrics::record_request(
        Method::GET.as_str(),
        response.status().as_u16(),
        "resolve",
        start,
    );
    response
}

/// POST to the token endpoint and map the upstream's answer onto the
/// caller's response.
async fn request_token(state: &AppState, id: &str) -> Result<Response, reqwest::Error> {
    let base = state.upstream.base_url.trim_end_matches('/');

    tracing::debug!(id = %id, "Requesting playback token");

    let upstream = state
        .client
        .post(token_url(base, id))
        .header(header::USER_AGENT, RESOLVER_USER_AGENT)
        .header(header::REFERER, format!("{}/live/{}", base, id))
        .header(header::ORIGIN, base)
        .header(header::ACCEPT, "application/json")
        .header("X-Requested-With", "XMLHttpRequest")
        .header(header::COOKIE, state.credentials.cookie_header())
        .send()
        .await?;

    let status = upstream.status();
    if status == StatusCode::FORBIDDEN {
        // Credential expiry, not a transient fault.
        tracing::warn!(id = %id, "Token endpoint rejected session credentials");
        return Ok((StatusCode::FORBIDDEN, "Access forbidden (403)").into_response());
    }
    if !status.is_success() {
        return Ok((status, format!("Error: {}", status.as_u16())).into_response());
    }

    let payload: Value = upstream.json().await?;
    match payload.get("hls_url").and_then(Value::as_str) {
        Some(hls_url) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, MANIFEST_CONTENT_TYPE)],
            manifest_body(hls_url),
        )
            .into_response()),
        None => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            "No HLS URL found in response",
        )
            .into_response()),
    }
}

/// Token endpoint for an identifier, substituted verbatim.
fn token_url(base: &str, id: &str) -> String {
    format!("{}/live/{}/tokens", base, id)
}

/// Single-line manifest pointing at the playback URL.
fn manifest_body(hls_url: &str) -> String {
    format!("{}\n", hls_url)
}
