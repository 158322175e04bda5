//! Downstream call subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved Route + path values
//!     → client.rs (build URL, attach request ID, enforce timeouts)
//!     → reqwest (pooled connection)
//!     → http::response (interpret status + body)
//!     → JSON value or GatewayError
//! ```
//!
//! # Design Decisions
//! - One client per process, built at startup and shared read-only
//! - Every call has a connect and a total deadline
//! - Exactly one attempt per call; no retries

pub mod client;

pub use client::DownstreamClient;
