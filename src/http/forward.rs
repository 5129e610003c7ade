//! Generic forward-proxy handler.
//!
//! # Responsibilities
//! - Extract and validate the target URL embedded in the request path
//! - Override the client identity header
//! - Forward method, headers and body to the target origin
//! - Relay the upstream response with a sanitized header set
//!
//! # Design Decisions
//! - The target is everything after the leading `/`, taken verbatim;
//!   nothing beyond the scheme check is decoded or validated
//! - The inbound body is drained at most once, and the decision is made
//!   from the method before any read
//! - The upstream body is streamed through, never fully buffered

use std::time::Instant;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::sanitize_response_headers;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Fixed identity presented to target origins, replacing whatever the
/// caller supplied.
pub const FORWARD_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120 Safari/537.36";

/// Error type for the forwarder. Client-input errors are detected before
/// any network call; transport faults surface here as the runtime's
/// fault boundary.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Invalid target URL")]
    InvalidTarget,

    #[error("Failed to read request body")]
    BodyRead(#[source] axum::Error),

    #[error("Upstream request failed")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let status = match self {
            ForwardError::InvalidTarget => StatusCode::BAD_REQUEST,
            ForwardError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

/// Relay the inbound request to the URL embedded in its path.
pub async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = match relay(&state, request).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                ForwardError::Upstream(source) => {
                    tracing::error!(error = %source, "Upstream request failed");
                }
                other => {
                    tracing::warn!(error = %other, "Rejected forward request");
                }
            }
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), "forward", start);
    response
}

async fn relay(state: &AppState, request: Request<Body>) -> Result<Response, ForwardError> {
    let target = extract_target(request.uri())?;

    tracing::debug!(method = %request.method(), target = %target, "Forwarding request");

    let (parts, body) = request.into_parts();
    let body = if carries_body(&parts.method) {
        Some(
            to_bytes(body, usize::MAX)
                .await
                .map_err(ForwardError::BodyRead)?,
        )
    } else {
        None
    };

    let headers = forward_headers(&parts.headers);
    let upstream = build_outbound(&state.client, parts.method, &target, headers, body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = sanitize_response_headers(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Strip the single leading path separator; the remainder, query string
/// included, is the candidate target taken verbatim.
fn extract_target(uri: &Uri) -> Result<String, ForwardError> {
    let candidate = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let candidate = candidate.strip_prefix('/').unwrap_or(candidate);

    if !candidate.starts_with("https://") {
        return Err(ForwardError::InvalidTarget);
    }
    Ok(candidate.to_string())
}

/// Whether the inbound body is forwarded for this method. GET and HEAD
/// never carry one upstream, even if the caller supplied one.
fn carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

/// Copy the inbound headers for the outbound leg.
///
/// `Host` and the framing headers belong to the outbound client, which
/// derives them from the target URL and the forwarded body. `User-Agent`
/// is overwritten unconditionally.
fn forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::TRANSFER_ENCODING);
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(FORWARD_USER_AGENT),
    );
    headers
}

fn build_outbound(
    client: &reqwest::Client,
    method: Method,
    target: &str,
    headers: HeaderMap,
    body: Option<Bytes>,
) -> reqwest::RequestBuilder {
    let mut builder = client.request(method, target).headers(headers);
    if let Some(bytes) = body {
        builder = builder.body(bytes);
    }
    builder
}
