//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with the server at construction
//!
//! process environment
//!     → credentials.rs (AHOY_VISITOR / AHOY_VISIT)
//!     → CredentialBundle (immutable, redacted Debug)
//!     → passed into the server at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Credentials are never part of the config file schema and never
//!   read from ambient globals inside a handler

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::CredentialBundle;
pub use schema::GatewayConfig;
pub use schema::GatewayMode;
pub use schema::ListenerConfig;
pub use schema::UpstreamConfig;
