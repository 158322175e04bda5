//! Shared HTTP client for downstream services.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::http::request::X_REQUEST_ID;
use crate::http::response::{map_downstream_response, map_transport_error};
use crate::routing::{PathParams, Route};

/// Pooled client with bounded timeouts on every call.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl DownstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let timeout = Duration::from_millis(timeouts.downstream_ms);
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .timeout(timeout)
            // Downstream services are internal; never route them through a system proxy.
            .no_proxy()
            // A redirect would be a second downstream call; 3xx is relayed like any other status.
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("chat-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, timeout })
    }

    /// Total deadline applied to each call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a request for `route`, with path values rendered and the request ID attached.
    pub fn request(
        &self,
        route: &Route,
        params: &PathParams,
        request_id: &str,
    ) -> GatewayResult<RequestBuilder> {
        let url = route
            .url(params)
            .map_err(|e| GatewayError::unavailable(route.operation, format!("cannot build URL: {}", e)))?;

        Ok(self
            .http
            .request(route.method.clone(), url)
            .header(X_REQUEST_ID, request_id))
    }

    /// Send a prepared request once and interpret the reply.
    pub async fn execute(&self, route: &Route, request: RequestBuilder) -> GatewayResult<Value> {
        let operation = route.operation;

        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(operation, &e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport_error(operation, &e))?;

        tracing::debug!(
            operation = %operation,
            status = status.as_u16(),
            bytes = body.len(),
            "Downstream replied"
        );

        map_downstream_response(operation, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::routing::{Operation, RouteTable};

    #[test]
    fn test_request_renders_route() {
        let client = DownstreamClient::new(&TimeoutConfig::default()).unwrap();
        let table = RouteTable::from_config(&RoutingConfig::default()).unwrap();
        let route = table.resolve(Operation::SubmitFeedback);

        let request = client
            .request(route, &PathParams::new().with_interaction_id("i-7"), "req-1")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::PATCH);
        assert_eq!(
            request.url().as_str(),
            "http://interactions-service:8002/interactions/i-7/feedback"
        );
        assert_eq!(request.headers()[X_REQUEST_ID], "req-1");
        assert_eq!(client.timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_missing_path_value_is_internal_failure() {
        let client = DownstreamClient::new(&TimeoutConfig::default()).unwrap();
        let table = RouteTable::from_config(&RoutingConfig::default()).unwrap();
        let route = table.resolve(Operation::SubmitFeedback);

        let err = client.request(route, &PathParams::new(), "req-1").unwrap_err();
        assert!(matches!(err, GatewayError::DownstreamUnavailable { .. }));
    }
}
