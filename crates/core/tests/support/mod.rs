//! Shared test helpers for `qbis-core` integration tests.
//!
//! These helpers provide a week snapshot builder and a recording
//! `TimesheetApi` fake so that tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod api;
pub mod sheet;

pub use api::{Endpoint, RecordingApi};
pub use sheet::{employee, span, SheetBuilder};
