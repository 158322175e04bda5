//! Startup orchestration.
//!
//! # Responsibilities
//! - Compile the route table from validated configuration
//! - Build the shared downstream client
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound only after the gateway is ready
//! - Config loading and binding report their own errors in `main`

use thiserror::Error;

use crate::config::GatewayConfig;
use crate::downstream::DownstreamClient;
use crate::gateway::Gateway;
use crate::routing::{ConfigurationError, RouteTable};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("routing error: {0}")]
    Routing(#[from] ConfigurationError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Build the gateway core from configuration.
pub fn build_gateway(config: &GatewayConfig) -> Result<Gateway, StartupError> {
    let routes = RouteTable::from_config(&config.routing)?;
    let client = DownstreamClient::new(&config.timeouts)?;

    tracing::info!(
        feedback_shape = %routes.feedback_shape(),
        downstream_timeout_ms = client.timeout().as_millis() as u64,
        "Gateway initialized"
    );

    Ok(Gateway::new(routes, client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Operation;

    #[test]
    fn test_missing_route_aborts_startup() {
        let mut config = GatewayConfig::default();
        config.routing.routes.clear();
        let err = build_gateway(&config).unwrap_err();
        assert!(matches!(
            err,
            StartupError::Routing(ConfigurationError::MissingRoute(Operation::SubmitQuery))
        ));
    }

    #[test]
    fn test_default_config_starts() {
        let gateway = build_gateway(&GatewayConfig::default()).unwrap();
        assert_eq!(
            gateway.routes().resolve(Operation::SubmitQuery).base_url.as_str(),
            "http://bot-service:8001/"
        );
    }
}
