//! # Qbis Domain
//!
//! Shared vocabulary of the Qbis timesheet client.
//!
//! This crate contains:
//! - The error taxonomy and `Result` alias
//! - The date codec for the service's wire and ISO formats
//! - Client configuration
//! - Wire data contracts of the timesheet endpoints
//!
//! ## Architecture
//! - No dependencies on other qbis crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::QbisConfig;
pub use dates::QbisDate;
pub use errors::*;
pub use types::*;
