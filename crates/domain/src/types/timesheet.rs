//! The timesheet snapshot returned by `GetTimeSheetData`

use serde::{Deserialize, Serialize};

use super::{Extra, ProjectTime, SalaryActivityOption, SalaryTime, WorkingTime};

/// Complete server-side state of one week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetData {
    #[serde(default)]
    pub day_settings: Vec<DaySetting>,
    #[serde(default)]
    pub working_time_days: Vec<WorkingTime>,
    #[serde(default)]
    pub list_of_salary_time: Vec<SalaryTime>,
    /// Salary activities the employee may add. Excludes the default activity.
    #[serde(default)]
    pub list_of_salary_activities: Vec<SalaryActivityOption>,
    #[serde(default)]
    pub list_of_project_time: Vec<ProjectTime>,
    #[serde(default)]
    pub summary_data: SummaryData,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Per-day flags and schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DaySetting {
    pub day_date: String,
    #[serde(default)]
    pub is_holiday: bool,
    #[serde(default)]
    pub has_schedule: bool,
    #[serde(default)]
    pub my_schedule: ScheduleDay,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleDay {
    #[serde(default)]
    pub total_minutes: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Server-computed week totals. Stale as soon as the week is edited locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryData {
    #[serde(default)]
    pub has_schedule: bool,
    #[serde(default)]
    pub scheduled_hours: f64,
    #[serde(default)]
    pub worked_hours: f64,
    #[serde(default)]
    pub week_status: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SummaryData {
    pub fn status(&self) -> WeekStatus {
        WeekStatus::from_code(self.week_status)
    }
}

/// Approval state of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStatus {
    Open,
    Closed,
    /// Approved by a manager.
    Approved,
    Unknown(i32),
}

impl WeekStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Open,
            1 => Self::Closed,
            2 => Self::Approved,
            other => Self::Unknown(other),
        }
    }
}
