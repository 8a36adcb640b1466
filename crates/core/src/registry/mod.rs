//! Activity registries
//!
//! Read-only views over the activities a week knows about. Salary
//! activities come from the snapshot and its catalog; project activities
//! from the snapshot and a three-level company, project and activity tree
//! fetched on demand.
//!
//! Views borrow the [`Week`](crate::week::Week) they were taken from and
//! hold no copies of the snapshot.

pub mod project;
pub mod salary;

pub use project::{CatalogProject, Company, ProjectActivity, ProjectCatalog};
pub use salary::SalaryActivity;
