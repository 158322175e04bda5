//! Route lookup.
//!
//! # Responsibilities
//! - Compile the configured routes into typed (URL, template, verb) triples
//! - Resolve a logical operation to its route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Incomplete or inconsistent tables fail at startup, never per request

use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::config::{RouteConfig, RoutingConfig};
use crate::routing::operation::Operation;
use crate::routing::template::{PathParam, PathParams, PathTemplate, RenderError, TemplateError};
use crate::transform::FeedbackShape;

/// Route table problems. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no route registered for operation '{0}'")]
    MissingRoute(Operation),

    #[error("operation '{0}' is routed more than once")]
    DuplicateRoute(Operation),

    #[error("route for '{operation}' has invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        operation: Operation,
        url: String,
        reason: String,
    },

    #[error("route for '{operation}' has invalid method '{method}'")]
    InvalidMethod { operation: Operation, method: String },

    #[error("route for '{operation}' has invalid path: {source}")]
    InvalidPath {
        operation: Operation,
        #[source]
        source: TemplateError,
    },

    #[error("route for '{operation}' cannot fill '{{{}}}' in path '{path}'", .param.name())]
    UnfillablePlaceholder {
        operation: Operation,
        param: PathParam,
        path: String,
    },

    #[error("feedback shape '{shape}' requires a path {requirement}, got '{path}'")]
    ShapeMismatch {
        shape: FeedbackShape,
        requirement: &'static str,
        path: String,
    },
}

/// A compiled downstream route.
#[derive(Debug, Clone)]
pub struct Route {
    pub operation: Operation,
    pub base_url: Url,
    pub path: PathTemplate,
    pub method: Method,
}

impl Route {
    fn compile(config: &RouteConfig) -> Result<Self, ConfigurationError> {
        let operation = config.operation;
        let invalid_base = |reason: &str| ConfigurationError::InvalidBaseUrl {
            operation,
            url: config.base_url.clone(),
            reason: reason.to_string(),
        };

        let base_url = Url::parse(&config.base_url).map_err(|e| invalid_base(&e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid_base("scheme must be http or https"));
        }
        if base_url.cannot_be_a_base() || base_url.host_str().is_none() {
            return Err(invalid_base("missing host"));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(invalid_base("query and fragment are not allowed"));
        }

        let method = Method::from_bytes(config.method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| ConfigurationError::InvalidMethod {
                operation,
                method: config.method.clone(),
            })?;

        let path = PathTemplate::parse(&config.path)
            .map_err(|source| ConfigurationError::InvalidPath { operation, source })?;

        Ok(Self {
            operation,
            base_url,
            path,
            method,
        })
    }

    /// Full downstream URL for one request.
    pub fn url(&self, params: &PathParams) -> Result<Url, RenderError> {
        self.path.render(&self.base_url, params)
    }
}

/// Immutable operation → route mapping built at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    query: Route,
    feedback: Route,
    feedback_shape: FeedbackShape,
}

impl RouteTable {
    /// Compile and check the configured routes.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ConfigurationError> {
        let mut query = None;
        let mut feedback = None;

        for route_config in &config.routes {
            let slot = match route_config.operation {
                Operation::SubmitQuery => &mut query,
                Operation::SubmitFeedback => &mut feedback,
            };
            if slot.is_some() {
                return Err(ConfigurationError::DuplicateRoute(route_config.operation));
            }
            *slot = Some(Route::compile(route_config)?);
        }

        let query = query.ok_or(ConfigurationError::MissingRoute(Operation::SubmitQuery))?;
        let feedback = feedback.ok_or(ConfigurationError::MissingRoute(Operation::SubmitFeedback))?;

        // Nothing in a chat request can fill a placeholder.
        if let Some(param) = query.path.params().next() {
            return Err(ConfigurationError::UnfillablePlaceholder {
                operation: Operation::SubmitQuery,
                param,
                path: query.path.as_str().to_string(),
            });
        }
        check_feedback_shape(config.feedback_shape, &feedback.path)?;

        tracing::debug!(
            query_route = %format!("{} {}{}", query.method, query.base_url, query.path.as_str()),
            feedback_route = %format!("{} {}{}", feedback.method, feedback.base_url, feedback.path.as_str()),
            feedback_shape = %config.feedback_shape,
            "Route table compiled"
        );

        Ok(Self {
            query,
            feedback,
            feedback_shape: config.feedback_shape,
        })
    }

    /// Route for a logical operation.
    pub fn resolve(&self, operation: Operation) -> &Route {
        match operation {
            Operation::SubmitQuery => &self.query,
            Operation::SubmitFeedback => &self.feedback,
        }
    }

    /// Internal feedback contract the feedback route was checked against.
    pub fn feedback_shape(&self) -> FeedbackShape {
        self.feedback_shape
    }
}

fn check_feedback_shape(shape: FeedbackShape, path: &PathTemplate) -> Result<(), ConfigurationError> {
    let has_id = path.contains(PathParam::InteractionId);
    match shape {
        FeedbackShape::PatchInteraction if !has_id => Err(ConfigurationError::ShapeMismatch {
            shape,
            requirement: "containing '{interaction_id}'",
            path: path.as_str().to_string(),
        }),
        FeedbackShape::PostFeedback if has_id => Err(ConfigurationError::ShapeMismatch {
            shape,
            requirement: "without '{interaction_id}'",
            path: path.as_str().to_string(),
        }),
        _ => Ok(()),
    }
}
