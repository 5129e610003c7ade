//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root configuration for the stream gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Which handler this deployment serves.
    pub mode: GatewayMode,

    /// Token-endpoint upstream settings (resolve mode).
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// The handler a deployment serves. The forwarder and the resolver are
/// alternative entry points; a single process serves exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// Relay any request to the HTTPS URL embedded in its path.
    #[default]
    Forward,

    /// Exchange an identifier for a playback manifest URL.
    Resolve,
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GatewayMode::Forward => "forward",
            GatewayMode::Resolve => "resolve",
        })
    }
}

impl FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(GatewayMode::Forward),
            "resolve" => Ok(GatewayMode::Resolve),
            other => Err(format!(
                "unknown gateway mode '{}', expected 'forward' or 'resolve'",
                other
            )),
        }
    }
}

/// Token-endpoint upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the token API. The resolver derives the token
    /// endpoint, `Referer` and `Origin` from it.
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.vidio.com".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout for outbound calls in seconds.
    pub connect_secs: u64,

    /// Total timeout for one outbound call in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds. Larger than `upstream_secs`
    /// so outbound faults surface through the handlers, not the
    /// timeout middleware.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.mode, GatewayMode::Forward);
        assert_eq!(config.upstream.base_url, "https://www.vidio.com");
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.timeouts.upstream_secs, 30);
        assert_eq!(config.timeouts.request_secs, 60);
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_minimal_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            mode = "resolve"

            [upstream]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, GatewayMode::Resolve);
        assert_eq!(config.upstream.base_url, "https://api.example.com");
        // Untouched sections fall back to defaults
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("forward".parse::<GatewayMode>(), Ok(GatewayMode::Forward));
        assert_eq!("resolve".parse::<GatewayMode>(), Ok(GatewayMode::Resolve));
        assert!("proxy".parse::<GatewayMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [GatewayMode::Forward, GatewayMode::Resolve] {
            assert_eq!(mode.to_string().parse::<GatewayMode>(), Ok(mode));
        }
    }
}
