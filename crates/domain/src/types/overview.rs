//! Activity overview overlay (budget and spent hours)

use serde::{Deserialize, Serialize};

use super::Extra;
use crate::constants::overview::{ALLOCATED_HOURS, REGISTERED_HOURS, TOTAL_HOURS, UNIT_HOURS};
use crate::errors::{QbisError, Result};

/// Overlay data shown for a salary or project activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityOverview {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub properties: Vec<OverviewProperty>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverviewProperty {
    pub text_identifier: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub unit_identifier: String,
}

impl ActivityOverview {
    /// Budget allocated to the current employee.
    ///
    /// # Errors
    /// See [`ActivityOverview::property_minutes`].
    pub fn budget_minutes(&self) -> Result<i64> {
        self.property_minutes(ALLOCATED_HOURS)
    }

    /// Budget of the activity across all employees.
    ///
    /// # Errors
    /// See [`ActivityOverview::property_minutes`].
    pub fn total_budget_minutes(&self) -> Result<i64> {
        self.property_minutes(TOTAL_HOURS)
    }

    /// Time registered on the activity so far.
    ///
    /// # Errors
    /// See [`ActivityOverview::property_minutes`].
    pub fn spent_minutes(&self) -> Result<i64> {
        self.property_minutes(REGISTERED_HOURS)
    }

    /// Minutes held by an hours-valued property.
    ///
    /// The decimal separator follows the user's locale, so both `3,25`
    /// and `3.25` are accepted.
    ///
    /// # Errors
    /// `NotFound` if no property carries `identifier`, `Format` if the
    /// unit is not hours or the value is not a number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn property_minutes(&self, identifier: &str) -> Result<i64> {
        let property = self
            .properties
            .iter()
            .find(|p| p.text_identifier == identifier)
            .ok_or_else(|| QbisError::NotFound(format!("overview property '{identifier}'")))?;

        if property.unit_identifier != UNIT_HOURS {
            return Err(QbisError::Format(format!(
                "overview property '{identifier}' has unit '{}', expected '{UNIT_HOURS}'",
                property.unit_identifier
            )));
        }

        let hours: f64 = property.value.trim().replace(',', ".").parse().map_err(|e| {
            QbisError::Format(format!("overview property '{identifier}' = '{}': {e}", property.value))
        })?;
        if !hours.is_finite() {
            return Err(QbisError::Format(format!(
                "overview property '{identifier}' is not finite"
            )));
        }

        Ok((hours * 60.0).round() as i64)
    }
}
