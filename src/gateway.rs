//! Request orchestration for the two logical operations.
//!
//! Each operation validates its input, resolves its route, shapes the
//! payload and issues exactly one downstream call. Nothing here touches the
//! network before client input has been accepted.

use serde_json::Value;

use crate::downstream::DownstreamClient;
use crate::error::{GatewayError, GatewayResult};
use crate::routing::{Operation, PathParams, RouteTable};
use crate::transform::{transform_feedback, FeedbackShape, FeedbackSubmission};

/// Routes, payload shape and HTTP client shared by every request.
#[derive(Debug, Clone)]
pub struct Gateway {
    routes: RouteTable,
    client: DownstreamClient,
}

impl Gateway {
    pub fn new(routes: RouteTable, client: DownstreamClient) -> Self {
        Self { routes, client }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Forward a chat query to the bot service.
    ///
    /// The query travels as a query parameter; the reply is returned as-is.
    pub async fn submit_query(&self, query: Option<&str>, request_id: &str) -> GatewayResult<Value> {
        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Err(GatewayError::bad_request("query parameter 'query' is required")),
        };

        let route = self.routes.resolve(Operation::SubmitQuery);
        let request = self
            .client
            .request(route, &PathParams::new(), request_id)?
            .query(&[("query", query)]);

        self.client.execute(route, request).await
    }

    /// Translate and forward like/dislike feedback to the feedback service.
    pub async fn submit_feedback(
        &self,
        submission: &FeedbackSubmission,
        request_id: &str,
    ) -> GatewayResult<Value> {
        let shape = self.routes.feedback_shape();
        match submission.interaction_id.as_str() {
            "" => return Err(GatewayError::bad_request("field 'interaction_id' must not be empty")),
            // Only a path segment cannot carry these.
            "." | ".." if shape == FeedbackShape::PatchInteraction => {
                return Err(GatewayError::bad_request("field 'interaction_id' is not a valid identifier"))
            }
            _ => {}
        }

        let internal = transform_feedback(submission, shape)?;

        let route = self.routes.resolve(Operation::SubmitFeedback);
        let request = self
            .client
            .request(route, &internal.path_params(), request_id)?
            .json(&internal);

        self.client.execute(route, request).await
    }
}
