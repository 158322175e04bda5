//! Gateway error types.
//!
//! Client-visible rendering of these errors lives in `http::response`.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::routing::Operation;
use crate::transform::ValidationError;

/// Per-request failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing client input.
    #[error("{0}")]
    BadRequest(String),

    /// Well-formed client input with an uninterpretable value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Downstream answered with a non-success status and a JSON body.
    #[error("{operation} failed downstream with status {status}")]
    DownstreamStatus {
        operation: Operation,
        status: StatusCode,
        body: Value,
    },

    /// Downstream unreachable, too slow, or answered with something unparsable.
    #[error("Error forwarding request to {}: {cause}", .operation.service_name())]
    DownstreamUnavailable { operation: Operation, cause: String },
}

impl GatewayError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        GatewayError::BadRequest(reason.into())
    }

    pub fn unavailable(operation: Operation, cause: impl Into<String>) -> Self {
        GatewayError::DownstreamUnavailable {
            operation,
            cause: cause.into(),
        }
    }

    /// Status the client will see.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::DownstreamStatus { status, .. } => *status,
            GatewayError::DownstreamUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::Validation(_) => "validation",
            GatewayError::DownstreamStatus { .. } => "status",
            GatewayError::DownstreamUnavailable { .. } => "unavailable",
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
