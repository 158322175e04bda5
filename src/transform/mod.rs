//! Payload transformation subsystem.
//!
//! # Data Flow
//! ```text
//! FeedbackSubmission (external: interaction_id + "like"|"dislike")
//!     → feedback.rs (validate literal, map to score)
//!     → InternalFeedback (shape selected by configuration)
//!     → path values for the route template + JSON body
//! ```
//!
//! # Design Decisions
//! - Pure functions: no I/O, no hidden state
//! - Unknown literals fail before any downstream call
//! - The shape is the same value the route table was checked against

pub mod feedback;

pub use feedback::{
    transform_feedback, FeedbackShape, FeedbackSubmission, InternalFeedback, Sentiment,
    ValidationError,
};
