//! `TimesheetApi` adapter for the Qbis JSON endpoints

mod client;

pub use client::QbisApi;
