//! Inbound HTTP handlers.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::Operation;
use crate::transform::FeedbackSubmission;

/// Query string of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// `POST /chat?query=...`
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ChatParams>, QueryRejection>,
) -> GatewayResult<Json<Value>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match params {
        Ok(Query(params)) => {
            state
                .gateway
                .submit_query(params.query.as_deref(), &request_id)
                .await
        }
        Err(rejection) => Err(GatewayError::bad_request(rejection.body_text())),
    };

    finish(Operation::SubmitQuery, &request_id, start, result)
}

/// `POST /feedback` with `{interaction_id, feedback}`.
pub async fn feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> GatewayResult<Json<Value>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match body {
        Ok(Json(submission)) => state.gateway.submit_feedback(&submission, &request_id).await,
        Err(rejection) => Err(GatewayError::bad_request(rejection.body_text())),
    };

    finish(Operation::SubmitFeedback, &request_id, start, result)
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// Log and record the outcome of one operation.
fn finish(
    operation: Operation,
    request_id: &str,
    start: Instant,
    result: GatewayResult<Value>,
) -> GatewayResult<Json<Value>> {
    match &result {
        Ok(_) => {
            metrics::record_request(operation, StatusCode::OK.as_u16(), start);
            tracing::info!(
                request_id = %request_id,
                operation = %operation,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Forwarded"
            );
        }
        Err(e) => {
            metrics::record_request(operation, e.status().as_u16(), start);
            match e {
                GatewayError::BadRequest(_) | GatewayError::Validation(_) => {
                    tracing::info!(
                        request_id = %request_id,
                        operation = %operation,
                        error = %e,
                        "Rejected client input"
                    );
                }
                GatewayError::DownstreamStatus { .. } | GatewayError::DownstreamUnavailable { .. } => {
                    metrics::record_downstream_failure(operation, e.kind());
                    tracing::warn!(
                        request_id = %request_id,
                        operation = %operation,
                        status = e.status().as_u16(),
                        error = %e,
                        "Downstream call failed"
                    );
                }
            }
        }
    }

    result.map(Json)
}
