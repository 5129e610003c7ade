//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/Ctrl+C → broadcast signal → stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, listeners last
//! - One broadcast channel; any long-running task can subscribe

pub mod shutdown;

pub use shutdown::Shutdown;
