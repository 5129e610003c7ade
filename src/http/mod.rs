//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, mode-based routing)
//!     → request.rs (request ID generation)
//!     → forward.rs (forward mode: relay to URL embedded in the path)
//!       or
//!       resolve.rs (resolve mode: /play.m3u8 token exchange)
//!     → response.rs (strip transport-framing headers on relay)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod resolve;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
