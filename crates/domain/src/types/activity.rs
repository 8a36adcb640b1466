//! Salary time and project time rows

use serde::{Deserialize, Serialize};

use super::{ActivityId, Extra};

/// One salary activity row of `listOfSalaryTime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalaryTime {
    pub activity_id: ActivityId,
    #[serde(default)]
    pub activity_name: String,
    #[serde(default)]
    pub days: Vec<ActivityDay>,
    #[serde(default)]
    pub allow_negative: bool,
    #[serde(default)]
    pub allow_positive: bool,
    /// The implicit komp-time activity. At most one per week.
    #[serde(default)]
    pub is_default: bool,
    /// Read-only schedule echo, not part of the save payload.
    #[serde(default, skip_serializing)]
    pub my_schedule_days: Option<Vec<serde_json::Value>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityDay {
    pub day_date: String,
    #[serde(default)]
    pub day_minutes: i32,
    #[serde(default)]
    pub day_days: i32,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ActivityDay {
    pub fn is_logged(&self) -> bool {
        self.day_minutes != 0 || self.day_days != 0
    }
}

/// One project activity row of `listOfProjectTime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectTime {
    pub activity_id: ActivityId,
    #[serde(default)]
    pub activity_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub days: Vec<ProjectDay>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectDay {
    pub day_date: String,
    #[serde(default)]
    pub day_minutes: i32,
    #[serde(default)]
    pub internal_notes: String,
    #[serde(default)]
    pub external_notes: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ProjectTime {
    /// True if any day of the week carries minutes.
    pub fn has_minutes(&self) -> bool {
        self.days.iter().any(|day| day.day_minutes != 0)
    }
}
