//! Recording in-memory `TimesheetApi`
//!
//! Counts calls per endpoint, keeps the last save payloads, serves
//! scripted responses and can be told to fail any endpoint.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use qbis_core::{TimesheetApi, WeekSpan};
use qbis_domain::{
    ActivityId, ActivityOverview, EmployeeId, EmployeeProjectTime, EmployeeSalaryTime,
    EmployeeWorkingTime, ProjectActivityListItem, ProjectCompany, ProjectTime, QbisError, Result,
    SalaryTime, SaveProjectTimeResponse, SaveSalaryTimeResponse, SaveWorkingTimeResponse,
    TimesheetData,
};

/// Remote operations of the port, for call counting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Timesheet,
    SalaryActivity,
    ProjectActivity,
    SalaryOverview,
    ProjectOverview,
    ProjectCompanies,
    ProjectActivities,
    SaveSalaryTime,
    SaveWorkingTime,
    SaveProjectTime,
}

#[derive(Default)]
struct State {
    calls: HashMap<Endpoint, usize>,
    /// Call order of every endpoint.
    log: Vec<Endpoint>,
    sheets: VecDeque<TimesheetData>,
    failures: HashMap<Endpoint, QbisError>,
    salary_save: Option<SaveSalaryTimeResponse>,
    working_save: Option<SaveWorkingTimeResponse>,
    project_save: Option<SaveProjectTimeResponse>,
    last_salary_payload: Option<EmployeeSalaryTime>,
    last_working_payload: Option<EmployeeWorkingTime>,
    last_project_payload: Option<EmployeeProjectTime>,
}

/// In-memory fake of the timesheet service.
#[derive(Default)]
pub struct RecordingApi {
    state: Mutex<State>,
    salary_records: HashMap<ActivityId, SalaryTime>,
    project_records: HashMap<ActivityId, ProjectTime>,
    overviews: HashMap<ActivityId, ActivityOverview>,
    companies: Vec<ProjectCompany>,
    project_activities: HashMap<i64, Vec<ProjectActivityListItem>>,
}

impl RecordingApi {
    /// Serve `sheet` for every timesheet fetch.
    pub fn new(sheet: TimesheetData) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().sheets.push_back(sheet);
        api
    }

    /// Serve `sheet` from the next fetch on, e.g. after a save.
    pub fn then_serve(self, sheet: TimesheetData) -> Self {
        self.state.lock().unwrap().sheets.push_back(sheet);
        self
    }

    pub fn with_salary_record(mut self, record: SalaryTime) -> Self {
        self.salary_records.insert(record.activity_id, record);
        self
    }

    /// Answer lookups of `activity_id` with `record`, whatever its own id.
    pub fn with_salary_record_as(mut self, activity_id: ActivityId, record: SalaryTime) -> Self {
        self.salary_records.insert(activity_id, record);
        self
    }

    pub fn with_project_record(mut self, record: ProjectTime) -> Self {
        self.project_records.insert(record.activity_id, record);
        self
    }

    pub fn with_overview(mut self, activity_id: ActivityId, overview: ActivityOverview) -> Self {
        self.overviews.insert(activity_id, overview);
        self
    }

    pub fn with_companies(mut self, companies: Vec<ProjectCompany>) -> Self {
        self.companies = companies;
        self
    }

    pub fn with_project_activities(mut self, project_id: i64, items: Vec<ProjectActivityListItem>) -> Self {
        self.project_activities.insert(project_id, items);
        self
    }

    pub fn with_salary_save(self, response: SaveSalaryTimeResponse) -> Self {
        self.state.lock().unwrap().salary_save = Some(response);
        self
    }

    pub fn with_working_save(self, response: SaveWorkingTimeResponse) -> Self {
        self.state.lock().unwrap().working_save = Some(response);
        self
    }

    pub fn with_project_save(self, response: SaveProjectTimeResponse) -> Self {
        self.state.lock().unwrap().project_save = Some(response);
        self
    }

    /// Make every call to `endpoint` fail with `error`.
    pub fn failing(self, endpoint: Endpoint, error: QbisError) -> Self {
        self.fail(endpoint, error);
        self
    }

    pub fn fail(&self, endpoint: Endpoint, error: QbisError) {
        self.state.lock().unwrap().failures.insert(endpoint, error);
    }

    pub fn heal(&self, endpoint: Endpoint) {
        self.state.lock().unwrap().failures.remove(&endpoint);
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.state.lock().unwrap().calls.get(&endpoint).copied().unwrap_or(0)
    }

    /// Every call in the order it was made.
    pub fn call_log(&self) -> Vec<Endpoint> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn last_salary_payload(&self) -> Option<EmployeeSalaryTime> {
        self.state.lock().unwrap().last_salary_payload.clone()
    }

    pub fn last_working_payload(&self) -> Option<EmployeeWorkingTime> {
        self.state.lock().unwrap().last_working_payload.clone()
    }

    pub fn last_project_payload(&self) -> Option<EmployeeProjectTime> {
        self.state.lock().unwrap().last_project_payload.clone()
    }

    fn record(&self, endpoint: Endpoint) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(endpoint).or_default() += 1;
        state.log.push(endpoint);
        match state.failures.get(&endpoint) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl TimesheetApi for RecordingApi {
    fn fetch_timesheet(&self, _: &EmployeeId, _: &WeekSpan) -> Result<TimesheetData> {
        self.record(Endpoint::Timesheet)?;
        let mut state = self.state.lock().unwrap();
        if state.sheets.len() > 1 {
            Ok(state.sheets.pop_front().unwrap())
        } else {
            Ok(state.sheets.front().cloned().unwrap_or_default())
        }
    }

    fn fetch_salary_activity(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<SalaryTime> {
        self.record(Endpoint::SalaryActivity)?;
        self.salary_records
            .get(&id)
            .cloned()
            .ok_or_else(|| QbisError::NotFound(format!("salary activity {id}")))
    }

    fn fetch_project_activity(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<ProjectTime> {
        self.record(Endpoint::ProjectActivity)?;
        self.project_records
            .get(&id)
            .cloned()
            .ok_or_else(|| QbisError::NotFound(format!("project activity {id}")))
    }

    fn salary_activity_overview(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<ActivityOverview> {
        self.record(Endpoint::SalaryOverview)?;
        self.overviews.get(&id).cloned().ok_or_else(|| QbisError::NotFound(format!("overview {id}")))
    }

    fn project_activity_overview(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<ActivityOverview> {
        self.record(Endpoint::ProjectOverview)?;
        self.overviews.get(&id).cloned().ok_or_else(|| QbisError::NotFound(format!("overview {id}")))
    }

    fn fetch_project_companies(&self, _: &EmployeeId, _: &WeekSpan) -> Result<Vec<ProjectCompany>> {
        self.record(Endpoint::ProjectCompanies)?;
        Ok(self.companies.clone())
    }

    fn fetch_project_activities(
        &self,
        _: &EmployeeId,
        _: &WeekSpan,
        project_id: i64,
    ) -> Result<Vec<ProjectActivityListItem>> {
        self.record(Endpoint::ProjectActivities)?;
        self.project_activities
            .get(&project_id)
            .cloned()
            .ok_or_else(|| QbisError::Transport(format!("HTTP 500 listing activities of project {project_id}")))
    }

    fn save_salary_time(&self, payload: &EmployeeSalaryTime) -> Result<SaveSalaryTimeResponse> {
        self.record(Endpoint::SaveSalaryTime)?;
        let mut state = self.state.lock().unwrap();
        state.last_salary_payload = Some(payload.clone());
        Ok(state
            .salary_save
            .clone()
            .unwrap_or(SaveSalaryTimeResponse { was_saved: true, ..SaveSalaryTimeResponse::default() }))
    }

    fn save_working_time(&self, payload: &EmployeeWorkingTime) -> Result<SaveWorkingTimeResponse> {
        self.record(Endpoint::SaveWorkingTime)?;
        let mut state = self.state.lock().unwrap();
        state.last_working_payload = Some(payload.clone());
        Ok(state.working_save.clone().unwrap_or_default())
    }

    fn save_project_time(&self, payload: &EmployeeProjectTime) -> Result<SaveProjectTimeResponse> {
        self.record(Endpoint::SaveProjectTime)?;
        let mut state = self.state.lock().unwrap();
        state.last_project_payload = Some(payload.clone());
        Ok(state
            .project_save
            .clone()
            .unwrap_or(SaveProjectTimeResponse { was_saved: true, ..SaveProjectTimeResponse::default() }))
    }
}
