//! # Qbis Core
//!
//! Pure timesheet logic - no HTTP, no session handling.
//!
//! This crate contains:
//! - The [`TimesheetApi`] port every remote call goes through
//! - The [`Week`] aggregate with its day views and save transaction
//! - Salary and project activity registries
//!
//! ## Architecture Principles
//! - Only depends on `qbis-domain`
//! - The transport is supplied by the caller as an `Arc<dyn TimesheetApi>`
//! - Blocking and single-threaded per week

pub mod ports;
pub mod registry;
pub mod week;

pub use ports::TimesheetApi;
pub use registry::{CatalogProject, Company, ProjectActivity, ProjectCatalog, SalaryActivity};
pub use week::{Day, DayHandle, SaveReport, SaveState, Week, WeekSpan, DAYS_IN_WEEK};
