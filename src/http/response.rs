//! Response header transformation.
//!
//! # Responsibilities
//! - Transform upstream response headers for the client
//! - Strip transport-framing headers on relay
//!
//! # Design Decisions
//! - A fresh header map is built rather than mutating the upstream's
//! - `Content-Encoding` and `Transfer-Encoding` are dropped: the
//!   outbound transport re-encodes and re-frames the body itself, and
//!   stale values would corrupt the client's decoding
//! - Everything else is preserved with identical values, duplicates
//!   included

use axum::http::header::{CONTENT_ENCODING, TRANSFER_ENCODING};
use axum::http::HeaderMap;

/// Copy upstream response headers into a fresh map, dropping the
/// transport-framing entries.
pub fn sanitize_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut sanitized = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if name == CONTENT_ENCODING || name == TRANSFER_ENCODING {
            continue;
        }
        sanitized.append(name.clone(), value.clone());
    }
    sanitized
}
