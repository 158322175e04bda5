//! Feedback payload translation between the public and internal contracts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::PathParams;

/// Internal feedback contract spoken by the feedback backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackShape {
    /// `POST /feedback` with `{interaction_id, feedback_score}`.
    PostFeedback,
    /// `PATCH /interactions/{interaction_id}/feedback` with `{feedback_score}`.
    #[default]
    PatchInteraction,
}

impl FeedbackShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackShape::PostFeedback => "post_feedback",
            FeedbackShape::PatchInteraction => "patch_interaction",
        }
    }

    /// Path the feedback backend exposes for this shape.
    pub fn default_path(&self) -> &'static str {
        match self {
            FeedbackShape::PostFeedback => "/feedback",
            FeedbackShape::PatchInteraction => "/interactions/{interaction_id}/feedback",
        }
    }

    /// Verb the feedback backend expects for this shape.
    pub fn default_method(&self) -> &'static str {
        match self {
            FeedbackShape::PostFeedback => "POST",
            FeedbackShape::PatchInteraction => "PATCH",
        }
    }
}

impl std::fmt::Display for FeedbackShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client payload semantically invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("feedback must be 'like' or 'dislike', got '{0}'")]
    UnknownFeedback(String),
}

/// User sentiment carried by a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Like,
    Dislike,
}

impl Sentiment {
    /// Integer encoding used by the feedback backend.
    pub fn score(&self) -> i8 {
        match self {
            Sentiment::Like => 1,
            Sentiment::Dislike => -1,
        }
    }
}

impl FromStr for Sentiment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Sentiment::Like),
            "dislike" => Ok(Sentiment::Dislike),
            other => Err(ValidationError::UnknownFeedback(other.to_string())),
        }
    }
}

/// Feedback as clients send it.
///
/// `feedback` stays a plain string here so that a well-formed body with an
/// unknown literal is reported as a validation error, not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeedbackSubmission {
    pub interaction_id: String,
    pub feedback: String,
}

/// Feedback as the active backend expects it. Serializes to the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InternalFeedback {
    PostFeedback {
        interaction_id: String,
        feedback_score: i8,
    },
    PatchInteraction {
        #[serde(skip)]
        interaction_id: String,
        feedback_score: i8,
    },
}

impl InternalFeedback {
    pub fn interaction_id(&self) -> &str {
        match self {
            InternalFeedback::PostFeedback { interaction_id, .. }
            | InternalFeedback::PatchInteraction { interaction_id, .. } => interaction_id,
        }
    }

    pub fn feedback_score(&self) -> i8 {
        match self {
            InternalFeedback::PostFeedback { feedback_score, .. }
            | InternalFeedback::PatchInteraction { feedback_score, .. } => *feedback_score,
        }
    }

    /// Values the feedback route template may substitute.
    pub fn path_params(&self) -> PathParams {
        match self {
            InternalFeedback::PostFeedback { .. } => PathParams::new(),
            InternalFeedback::PatchInteraction { interaction_id, .. } => {
                PathParams::new().with_interaction_id(interaction_id.as_str())
            }
        }
    }
}

/// Translate a client submission into the internal payload for `shape`.
pub fn transform_feedback(
    external: &FeedbackSubmission,
    shape: FeedbackShape,
) -> Result<InternalFeedback, ValidationError> {
    let feedback_score = external.feedback.parse::<Sentiment>()?.score();
    let interaction_id = external.interaction_id.clone();

    Ok(match shape {
        FeedbackShape::PostFeedback => InternalFeedback::PostFeedback {
            interaction_id,
            feedback_score,
        },
        FeedbackShape::PatchInteraction => InternalFeedback::PatchInteraction {
            interaction_id,
            feedback_score,
        },
    })
}
