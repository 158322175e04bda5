//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Logical operation (submit_query | submit_feedback)
//!     → router.rs (route table lookup)
//!     → template.rs (render path template with request values)
//!     → Return: (base URL + path, HTTP verb)
//!
//! Route Compilation (at startup):
//!     RoutingConfig
//!     → Parse base URLs, verbs and path templates
//!     → Check every operation is routed exactly once
//!     → Check the feedback route agrees with the feedback shape
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - A complete table is the only thing that can be built, so lookup never fails
//! - Backend renames and verb changes are configuration, not code

pub mod operation;
pub mod router;
pub mod template;

pub use operation::Operation;
pub use router::{ConfigurationError, Route, RouteTable};
pub use template::{PathParam, PathParams, PathTemplate, RenderError, TemplateError};
