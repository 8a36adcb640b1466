//! Working time: arrival, departure and break per day

use serde::{Deserialize, Serialize};

use super::{Extra, ScheduleDay};

/// One row of `workingTimeDays`. Clock times are minutes since local midnight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkingTime {
    pub day_date: String,
    #[serde(default)]
    pub arrive: i32,
    #[serde(default)]
    pub leave: i32,
    /// Break length in minutes.
    #[serde(default)]
    pub lunch: i32,
    /// Server-computed worked minutes. Only valid while `is_modified` is false.
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub is_modified: bool,
    #[serde(default)]
    pub breaks: Vec<WorkingTimeBreak>,
    /// Read-only schedule echo, not part of the save payload.
    #[serde(default, skip_serializing)]
    pub schedule_day: Option<ScheduleDay>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkingTimeBreak {
    pub break_date: String,
    #[serde(default)]
    pub break_from_minutes: i32,
    #[serde(default)]
    pub break_to_minutes: i32,
    #[serde(flatten)]
    pub extra: Extra,
}
