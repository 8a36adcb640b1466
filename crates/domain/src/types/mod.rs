//! Wire contracts of the Qbis timesheet service
//!
//! The service has no published schema. Each struct models only the fields
//! this client reads or writes and keeps everything else in an `extra` map,
//! so that the full-replace save protocol sends back what it received.

pub mod activity;
pub mod catalog;
pub mod overview;
pub mod save;
pub mod timesheet;
pub mod working;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{QbisError, Result};

pub use activity::{ActivityDay, ProjectDay, ProjectTime, SalaryTime};
pub use catalog::{Project, ProjectActivityListItem, ProjectCompany, SalaryActivityOption};
pub use overview::{ActivityOverview, OverviewProperty};
pub use save::{
    EmployeeProjectTime, EmployeeSalaryTime, EmployeeWorkingTime, SaveOutcome, SaveProjectTimeResponse,
    SaveSalaryTimeResponse, SaveStep, SaveWorkingTimeResponse,
};
pub use timesheet::{DaySetting, ScheduleDay, SummaryData, TimesheetData, WeekStatus};
pub use working::{WorkingTime, WorkingTimeBreak};

/// Fields of a wire object this client does not interpret.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Numeric identifier of a salary or project activity.
pub type ActivityId = i64;

/// Opaque numeric employee identifier scraped from the time overview page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validate and wrap a digits-only identifier.
    ///
    /// # Errors
    /// Returns `QbisError::Format` if `value` is empty or not all ASCII digits.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QbisError::Format(format!("employee id must be numeric, got '{value}'")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
