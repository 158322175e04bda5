//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use chat_gateway::config::{GatewayConfig, RoutingConfig};
use chat_gateway::http::HttpServer;
use chat_gateway::lifecycle::Shutdown;
use chat_gateway::transform::FeedbackShape;
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as seen by a mock downstream service.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub request_id: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: u16,
    body: &'static str,
    delay: Option<Duration>,
    location: Option<&'static str>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// In-process stand-in for a downstream service.
pub struct MockBackend {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start a mock backend that answers every request with `status` and a JSON `body`.
pub async fn start_backend(status: u16, body: &'static str) -> MockBackend {
    spawn_backend(status, body, None, None).await
}

/// Start a mock backend that waits `delay` before answering.
pub async fn start_slow_backend(delay: Duration) -> MockBackend {
    spawn_backend(200, r#"{"response":"late"}"#, Some(delay), None).await
}

/// Start a mock backend that answers every request with `302 Found` to `location`.
pub async fn start_redirecting_backend(location: &'static str) -> MockBackend {
    spawn_backend(302, r#"{"moved":true}"#, None, Some(location)).await
}

async fn spawn_backend(
    status: u16,
    body: &'static str,
    delay: Option<Duration>,
    location: Option<&'static str>,
) -> MockBackend {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        delay,
        location,
        calls: calls.clone(),
    };

    let app = Router::new().fallback(record).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, calls }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.lock().unwrap().push(RecordedCall {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = (
        StatusCode::from_u16(state.status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response();
    if let Some(location) = state.location {
        response
            .headers_mut()
            .insert(header::LOCATION, HeaderValue::from_static(location));
    }
    response
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Gateway configuration pointing at the given services.
pub fn gateway_config(bot_url: &str, feedback_url: &str, shape: FeedbackShape) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.routing = RoutingConfig::for_services(bot_url, feedback_url, shape);
    config.observability.metrics_enabled = false;
    config
}

/// A gateway server running in the background.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    // Held so the server keeps running until the test ends.
    shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let server = HttpServer::new(&config).expect("gateway should start");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    TestGateway {
        addr,
        client,
        shutdown,
    }
}
