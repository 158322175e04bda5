//! Chat gateway library.
//!
//! Forwards two logical operations, chat queries and like/dislike feedback,
//! to their backend services. Routes and the feedback payload shape come
//! from configuration so backend renames and verb changes need no code change.

pub mod config;
pub mod downstream;
pub mod error;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod transform;

pub use config::schema::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::Gateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
