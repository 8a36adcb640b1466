use std::sync::Arc;

use chrono::Utc;
use qbis_core::{TimesheetApi, WeekSpan};
use qbis_domain::constants::endpoints;
use qbis_domain::{
    ActivityId, ActivityOverview, EmployeeId, EmployeeProjectTime, EmployeeSalaryTime,
    EmployeeWorkingTime, ProjectActivityListItem, ProjectCompany, ProjectTime, Result, SalaryTime,
    SaveProjectTimeResponse, SaveSalaryTimeResponse, SaveWorkingTimeResponse, TimesheetData,
};
use tracing::debug;

use crate::session::Session;

/// Catalog lists are not filtered by a pre-selected entry.
const NO_SELECTION: &str = "0";

/// [`TimesheetApi`] over an authenticated [`Session`].
#[derive(Debug, Clone)]
pub struct QbisApi {
    session: Arc<Session>,
}

impl QbisApi {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

/// Query shared by every week-scoped GET: employee, ISO date span and a
/// cache-busting timestamp.
struct WeekQuery {
    params: Vec<(&'static str, String)>,
}

impl WeekQuery {
    fn new(employee: &EmployeeId, span: &WeekSpan) -> Self {
        Self {
            params: vec![
                ("employeeId", employee.as_str().to_string()),
                ("fromDate", span.from_iso()),
                ("toDate", span.to_iso()),
            ],
        }
    }

    fn activity(mut self, activity_id: ActivityId) -> Self {
        self.params.insert(0, ("activityId", activity_id.to_string()));
        self
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    fn finish(mut self) -> Vec<(&'static str, String)> {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        self.params.push(("_", nanos.to_string()));
        self.params
    }
}

impl TimesheetApi for QbisApi {
    fn fetch_timesheet(&self, employee: &EmployeeId, span: &WeekSpan) -> Result<TimesheetData> {
        debug!(employee_id = %employee, from = %span.from_iso(), "fetching timesheet");
        self.session.get_json(endpoints::TIMESHEET_DATA, &WeekQuery::new(employee, span).finish())
    }

    fn fetch_salary_activity(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<SalaryTime> {
        debug!(employee_id = %employee, activity_id, "fetching salary activity");
        let query = WeekQuery::new(employee, span).activity(activity_id).finish();
        self.session.get_json(endpoints::SALARY_ACTIVITY_INFORMATION, &query)
    }

    fn fetch_project_activity(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ProjectTime> {
        debug!(employee_id = %employee, activity_id, "fetching project activity");
        let query = WeekQuery::new(employee, span).activity(activity_id).finish();
        self.session.get_json(endpoints::PROJECT_ACTIVITY_INFORMATION, &query)
    }

    fn salary_activity_overview(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ActivityOverview> {
        let query = WeekQuery::new(employee, span).activity(activity_id).finish();
        self.session.get_json(endpoints::SALARY_ACTIVITY_OVERVIEW, &query)
    }

    fn project_activity_overview(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        activity_id: ActivityId,
    ) -> Result<ActivityOverview> {
        let query = WeekQuery::new(employee, span).activity(activity_id).finish();
        self.session.get_json(endpoints::PROJECT_ACTIVITY_OVERVIEW, &query)
    }

    fn fetch_project_companies(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
    ) -> Result<Vec<ProjectCompany>> {
        let query = WeekQuery::new(employee, span).param("selectedID", NO_SELECTION).finish();
        self.session.get_json(endpoints::PROJECT_COMPANIES, &query)
    }

    fn fetch_project_activities(
        &self,
        employee: &EmployeeId,
        span: &WeekSpan,
        project_id: i64,
    ) -> Result<Vec<ProjectActivityListItem>> {
        let query = WeekQuery::new(employee, span)
            .param("selectedID", NO_SELECTION)
            .param("projectID", project_id)
            .finish();
        self.session.get_json(endpoints::PROJECT_ACTIVITIES, &query)
    }

    fn save_salary_time(&self, payload: &EmployeeSalaryTime) -> Result<SaveSalaryTimeResponse> {
        self.session.exchange_json(endpoints::SAVE_SALARY_TIME, payload)
    }

    fn save_working_time(&self, payload: &EmployeeWorkingTime) -> Result<SaveWorkingTimeResponse> {
        self.session.exchange_json(endpoints::SAVE_WORKING_TIME, payload)
    }

    fn save_project_time(&self, payload: &EmployeeProjectTime) -> Result<SaveProjectTimeResponse> {
        self.session.exchange_json(endpoints::SAVE_PROJECT_TIME, payload)
    }
}
