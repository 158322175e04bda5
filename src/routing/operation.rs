//! Logical operations understood by the gateway.

use serde::{Deserialize, Serialize};

/// One of the two client-facing actions the gateway forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Forward a chat query to the bot service.
    SubmitQuery,
    /// Forward like/dislike feedback to the feedback service.
    SubmitFeedback,
}

impl Operation {
    /// Identifier used in configuration, logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SubmitQuery => "submit_query",
            Operation::SubmitFeedback => "submit_feedback",
        }
    }

    /// Human-readable name of the downstream service behind this operation.
    pub fn service_name(&self) -> &'static str {
        match self {
            Operation::SubmitQuery => "Bot Service",
            Operation::SubmitFeedback => "Feedback Service",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
