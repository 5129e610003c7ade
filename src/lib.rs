//! HTTP Stream Gateway Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use config::schema::GatewayMode;
pub use config::CredentialBundle;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
