//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Interpret a downstream response (status + body) for the client
//! - Turn transport failures into a uniform client error
//! - Render every `GatewayError` as a JSON response
//!
//! # Design Decisions
//! - Downstream status and JSON body pass through unmodified on failure
//! - Connectivity failures and unparsable bodies are always 500
//! - Gateway-originated errors use `{"detail": "..."}`

use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::routing::Operation;

/// Map a downstream reply to the forwarded JSON or a routed error.
pub fn map_downstream_response(
    operation: Operation,
    status: StatusCode,
    body: &[u8],
) -> Result<Value, GatewayError> {
    let parsed: Value = serde_json::from_slice(body).map_err(|e| {
        GatewayError::unavailable(
            operation,
            format!("unparsable response (status {}): {}", status.as_u16(), e),
        )
    })?;

    if status.is_success() {
        Ok(parsed)
    } else {
        Err(GatewayError::DownstreamStatus {
            operation,
            status,
            body: parsed,
        })
    }
}

/// Map a failure to send or read a downstream request.
pub fn map_transport_error(operation: Operation, err: &reqwest::Error) -> GatewayError {
    GatewayError::unavailable(operation, describe(err))
}

/// Render an error and its source chain on one line.
fn describe(err: &reqwest::Error) -> String {
    let mut cause = if err.is_timeout() {
        format!("timed out: {}", err)
    } else {
        err.to_string()
    };
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !cause.contains(&text) {
            cause.push_str(": ");
            cause.push_str(&text);
        }
        source = inner.source();
    }
    cause
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::DownstreamStatus { status, body, .. } => (status, Json(body)).into_response(),
            other => {
                let status = other.status();
                (status, Json(json!({ "detail": other.to_string() }))).into_response()
            }
        }
    }
}

/// Fallback for paths the gateway does not serve.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
}
