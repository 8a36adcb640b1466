//! Port interface to the remote timesheet service
//!
//! Every remote interaction of the week aggregate goes through
//! [`TimesheetApi`]. Calls are blocking and never retried.

use qbis_domain::{
    ActivityId, ActivityOverview, EmployeeId, EmployeeProjectTime, EmployeeSalaryTime,
    EmployeeWorkingTime, ProjectActivityListItem, ProjectCompany, ProjectTime, Result,
    SalaryTime, SaveProjectTimeResponse, SaveSalaryTimeResponse, SaveWorkingTimeResponse,
    TimesheetData,
};

use crate::week::WeekSpan;

/// Typed operations of the Qbis timesheet endpoints.
pub trait TimesheetApi: Send + Sync {
    /// Full timesheet snapshot of one week.
    fn fetch_timesheet(&self, employee: &EmployeeId, span: &WeekSpan) -> Result<TimesheetData>;

    /// Salary time row for an activity not yet present in the week.
    fn fetch_salary_activity(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<SalaryTime>;

    /// Project time row for an activity not yet present in the week.
    fn fetch_project_activity(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ProjectTime>;

    fn salary_activity_overview(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ActivityOverview>;

    fn project_activity_overview(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ActivityOverview>;

    /// Customer companies and their projects.
    fn fetch_project_companies(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
    ) -> Result<Vec<ProjectCompany>>;

    /// Activities of one project.
    fn fetch_project_activities(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        project_id: i64,
    ) -> Result<Vec<ProjectActivityListItem>>;

    fn save_salary_time(&self, payload: &EmployeeSalaryTime) -> Result<SaveSalaryTimeResponse>;

    fn save_working_time(&self, payload: &EmployeeWorkingTime)
        -> Result<SaveWorkingTimeResponse>;

    fn save_project_time(&self, payload: &EmployeeProjectTime)
        -> Result<SaveProjectTimeResponse>;
}
