//! # Qbis Infrastructure
//!
//! The impure half of the Qbis timesheet client.
//!
//! This crate contains:
//! - A blocking HTTP client with a cookie store
//! - The session transport: login and identity scraping
//! - The `TimesheetApi` adapter over the JSON endpoints
//! - `QbisClient`, the connect-then-fetch entry point
//! - Configuration loading and tracing bootstrap
//!
//! ## Architecture
//! - Implements traits defined in `qbis-core`
//! - Converts foreign errors into `QbisError` at the boundary

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

pub use api::QbisApi;
pub use client::QbisClient;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use session::Session;
