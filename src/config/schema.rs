//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the routing server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route resolution behaviour.
    pub routing: RoutingConfig,
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

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// How a request whose method is not declared for its route is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodMismatch {
    /// 404, indistinguishable in status from an unknown route.
    #[default]
    NotFound,
    /// 405 with an `Allow` header listing the declared methods.
    MethodNotAllowed,
}

/// How a template prefix is located in an incoming path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
    /// The prefix may occur anywhere in the path; the first occurrence is used.
    #[default]
    Contains,
    /// The prefix must be the path's leading segments.
    Anchored,
}

/// Route resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Liveness endpoint path, reserved from registration.
    pub health_path: String,

    /// Response policy for undeclared methods.
    pub method_mismatch: MethodMismatch,

    /// Prefix matching policy for templated routes.
    pub prefix_match: PrefixMatch,

    /// Register each resolved templated path as a static route.
    pub cache_resolved_routes: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            health_path: "/health".to_string(),
            method_mismatch: MethodMismatch::NotFound,
            prefix_match: PrefixMatch::Contains,
            cache_resolved_routes: true,
        }
    }
}
