//! Activity catalog entries: what the employee may log time on

use serde::{Deserialize, Serialize};

use super::{ActivityId, Extra};

/// Key/value entry of `listOfSalaryActivities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalaryActivityOption {
    pub key: ActivityId,
    pub value: String,
}

/// A customer company and its projects, from `GetCustomerProjectDropDown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCompany {
    #[serde(rename = "CompanyID")]
    pub company_id: i64,
    #[serde(rename = "CompanyName", default)]
    pub company_name: String,
    #[serde(rename = "Projects", default)]
    pub projects: Vec<Project>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name", default)]
    pub name: String,
    /// Optional project code; empty when the company does not use codes.
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Activity of a project, from `GetActivityDropDown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectActivityListItem {
    #[serde(rename = "ID")]
    pub id: ActivityId,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ReadOnly", default)]
    pub read_only: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
