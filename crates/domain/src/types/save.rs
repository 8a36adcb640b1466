//! Save payloads and the per-endpoint success conventions

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EmployeeId, Extra, ProjectTime, SalaryTime, WorkingTime, WorkingTimeBreak};
use crate::impl_snake_case_conversions;

/// One remote call of the save transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStep {
    SalaryTime,
    WorkingTime,
    ProjectTime,
}

impl SaveStep {
    /// Steps in the order they must be issued.
    pub const ORDER: [SaveStep; 3] = [Self::SalaryTime, Self::WorkingTime, Self::ProjectTime];
}

impl_snake_case_conversions!(SaveStep {
    SalaryTime => "salary_time",
    WorkingTime => "working_time",
    ProjectTime => "project_time",
});

/// Body of `SaveSalaryTime`. Carries the working time rows as well.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSalaryTime {
    pub employee_id: EmployeeId,
    pub from_date: String,
    pub to_date: String,
    pub salary_time: Vec<SalaryTime>,
    pub working_time: Vec<WorkingTime>,
    pub working_time_breaks: Option<Vec<WorkingTimeBreak>>,
}

/// Body of `SaveWorkingTime`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWorkingTime {
    pub days: Vec<WorkingTime>,
    pub employee_id: EmployeeId,
    pub from_date: String,
    pub to_date: String,
}

/// Body of `SaveProjectTime`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProjectTime {
    pub employee_id: EmployeeId,
    pub from_date: String,
    pub list: Vec<ProjectTime>,
    pub to_date: String,
}

/// How a save endpoint reports success.
///
/// The endpoints do not agree on a convention, so each response type
/// decides for itself.
pub trait SaveOutcome {
    /// True if the remote service committed the step.
    fn accepted(&self) -> bool;

    /// Human-readable reasons for a refusal.
    fn messages(&self) -> Vec<String>;

    /// Non-fatal remarks attached to an accepted save.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSalaryTimeResponse {
    #[serde(default)]
    pub from_to_validation_result: Option<String>,
    #[serde(default)]
    pub invalid_full_days_error: Option<String>,
    #[serde(default)]
    pub invalid_partial_days_error: Option<String>,
    #[serde(default)]
    pub limit_error_results: Option<Vec<Value>>,
    #[serde(default)]
    pub limit_warning_results: Option<Vec<Value>>,
    #[serde(default)]
    pub reset_warning: Option<String>,
    #[serde(default)]
    pub was_saved: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SaveOutcome for SaveSalaryTimeResponse {
    fn accepted(&self) -> bool {
        self.was_saved
    }

    fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = [
            &self.from_to_validation_result,
            &self.invalid_full_days_error,
            &self.invalid_partial_days_error,
        ]
        .into_iter()
        .filter_map(|m| non_empty(m.as_deref()))
        .collect();
        messages.extend(describe_all(self.limit_error_results.as_deref()));
        messages
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = non_empty(self.reset_warning.as_deref()).into_iter().collect();
        warnings.extend(describe_all(self.limit_warning_results.as_deref()));
        warnings
    }
}

/// `saved` holds an error message; empty or absent means success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveWorkingTimeResponse {
    #[serde(default)]
    pub saved: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SaveOutcome for SaveWorkingTimeResponse {
    fn accepted(&self) -> bool {
        self.saved.as_deref().map_or(true, str::is_empty)
    }

    fn messages(&self) -> Vec<String> {
        self.saved.iter().filter(|s| !s.is_empty()).cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProjectTimeResponse {
    #[serde(default)]
    pub duplicated_activities_error: Option<String>,
    #[serde(default)]
    pub limit_error_results: Option<Vec<Value>>,
    #[serde(default)]
    pub limit_warning_results: Option<Vec<Value>>,
    #[serde(default)]
    pub was_saved: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl SaveOutcome for SaveProjectTimeResponse {
    fn accepted(&self) -> bool {
        self.was_saved
    }

    fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> =
            non_empty(self.duplicated_activities_error.as_deref()).into_iter().collect();
        messages.extend(describe_all(self.limit_error_results.as_deref()));
        messages
    }

    fn warnings(&self) -> Vec<String> {
        describe_all(self.limit_warning_results.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Limit results have no fixed shape; prefer a message field when present.
fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => non_empty(Some(s)),
        Value::Object(map) => ["Message", "message", "Text", "text"]
            .iter()
            .find_map(|key| non_empty(map.get(*key).and_then(Value::as_str)))
            .or_else(|| Some(value.to_string())),
        other => Some(other.to_string()),
    }
}

fn describe_all(values: Option<&[Value]>) -> Vec<String> {
    values.unwrap_or_default().iter().filter_map(describe).collect()
}
