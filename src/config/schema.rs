//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Operation;
use crate::transform::FeedbackShape;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Downstream topology: one route per logical operation.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Inbound request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Route table and the active feedback contract.
///
/// The shape and the `submit_feedback` route must agree on where the
/// interaction id travels; the route table checks this at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Internal feedback contract currently spoken by the feedback backend.
    pub feedback_shape: FeedbackShape,

    /// Route definitions, one per logical operation.
    pub routes: Vec<RouteConfig>,
}

impl RoutingConfig {
    /// Canonical routing for a bot service and a feedback service speaking `shape`.
    pub fn for_services(bot_url: &str, feedback_url: &str, shape: FeedbackShape) -> Self {
        Self {
            feedback_shape: shape,
            routes: vec![
                RouteConfig {
                    operation: Operation::SubmitQuery,
                    base_url: bot_url.to_string(),
                    path: "/chat".to_string(),
                    method: "POST".to_string(),
                },
                RouteConfig {
                    operation: Operation::SubmitFeedback,
                    base_url: feedback_url.to_string(),
                    path: shape.default_path().to_string(),
                    method: shape.default_method().to_string(),
                },
            ],
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self::for_services(
            "http://bot-service:8001",
            "http://interactions-service:8002",
            FeedbackShape::default(),
        )
    }
}

/// Route configuration mapping one logical operation to a downstream endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Logical operation served by this route.
    pub operation: Operation,

    /// Downstream base URL (e.g., "http://bot-service:8001").
    pub base_url: String,

    /// Path template appended to the base URL. May contain `{interaction_id}`.
    pub path: String,

    /// HTTP verb used for the downstream call.
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_method() -> String {
    "POST".to_string()
}

/// Timeout configuration for inbound requests and downstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Downstream connection establishment timeout in milliseconds.
    pub connect_ms: u64,

    /// Total downstream call timeout (connect + response) in milliseconds.
    pub downstream_ms: u64,

    /// Inbound request deadline in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 2_000,
            downstream_ms: 5_000,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}
