//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by operation, status
//! - `gateway_request_duration_seconds` (histogram): latency by operation
//! - `gateway_downstream_failures_total` (counter): failures by operation, kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Operation;

pub const REQUESTS_TOTAL: &str = "gateway_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "gateway_request_duration_seconds";
pub const DOWNSTREAM_FAILURES_TOTAL: &str = "gateway_downstream_failures_total";

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one inbound request.
pub fn record_request(operation: Operation, status: u16, start: Instant) {
    ::metrics::counter!(
        REQUESTS_TOTAL,
        "operation" => operation.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(REQUEST_DURATION_SECONDS, "operation" => operation.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed downstream call (`kind` is `status` or `unavailable`).
pub fn record_downstream_failure(operation: Operation, kind: &'static str) {
    ::metrics::counter!(
        DOWNSTREAM_FAILURES_TOTAL,
        "operation" => operation.as_str(),
        "kind" => kind
    )
    .increment(1);
}
