//! Snapshot builders and a static port for unit tests

use std::collections::HashMap;
use std::sync::Arc;

use chrono::TimeZone;
use chrono_tz::Europe::Stockholm;
use qbis_domain::{
    ActivityDay, ActivityId, ActivityOverview, DaySetting, EmployeeId, EmployeeProjectTime,
    EmployeeSalaryTime, EmployeeWorkingTime, ProjectActivityListItem, ProjectCompany, ProjectDay,
    ProjectTime, QbisError, Result, SalaryActivityOption, SalaryTime, SaveProjectTimeResponse,
    SaveSalaryTimeResponse, SaveWorkingTimeResponse, ScheduleDay, SummaryData, TimesheetData,
    WorkingTime,
};

use super::{Week, WeekSpan, DAYS_IN_WEEK};
use crate::ports::TimesheetApi;

/// Monday 2024-01-15 00:00 in Stockholm.
const MONDAY: i64 = 1_705_273_200;

pub(crate) fn wire_day(index: usize) -> String {
    format!("/Date({}000)/", MONDAY + 86_400 * index as i64)
}

fn salary_days(minutes: [i32; DAYS_IN_WEEK]) -> Vec<ActivityDay> {
    minutes
        .iter()
        .enumerate()
        .map(|(i, m)| ActivityDay { day_date: wire_day(i), day_minutes: *m, ..ActivityDay::default() })
        .collect()
}

fn project_days(minutes: [i32; DAYS_IN_WEEK]) -> Vec<ProjectDay> {
    minutes
        .iter()
        .enumerate()
        .map(|(i, m)| ProjectDay { day_date: wire_day(i), day_minutes: *m, ..ProjectDay::default() })
        .collect()
}

pub(crate) fn salary_row(
    id: ActivityId,
    name: &str,
    allow_negative: bool,
    allow_positive: bool,
    is_default: bool,
) -> SalaryTime {
    SalaryTime {
        activity_id: id,
        activity_name: name.into(),
        days: salary_days([0; DAYS_IN_WEEK]),
        allow_negative,
        allow_positive,
        is_default,
        ..SalaryTime::default()
    }
}

pub(crate) fn project_row(id: ActivityId, name: &str, minutes: [i32; DAYS_IN_WEEK]) -> ProjectTime {
    ProjectTime {
        activity_id: id,
        activity_name: name.into(),
        project_name: "Timesheet client".into(),
        customer_name: "Acme".into(),
        days: project_days(minutes),
        ..ProjectTime::default()
    }
}

/// Week of 2024-01-15: weekdays 08:00-17:00 with an hour's break, an
/// open default komp activity, overtime that only takes positive values
/// and one project activity without time.
pub(crate) struct SheetBuilder {
    sheet: TimesheetData,
}

impl SheetBuilder {
    pub(crate) fn new() -> Self {
        let weekday = |i: usize| i < 5;
        let day_settings = (0..DAYS_IN_WEEK)
            .map(|i| DaySetting {
                day_date: wire_day(i),
                has_schedule: weekday(i),
                my_schedule: ScheduleDay {
                    total_minutes: if weekday(i) { 480 } else { 0 },
                    ..ScheduleDay::default()
                },
                ..DaySetting::default()
            })
            .collect();
        let working_time_days = (0..DAYS_IN_WEEK)
            .map(|i| {
                let (arrive, leave, lunch, total) =
                    if weekday(i) { (480, 1020, 60, 480) } else { (0, 0, 0, 0) };
                WorkingTime { day_date: wire_day(i), arrive, leave, lunch, total, ..WorkingTime::default() }
            })
            .collect();

        Self {
            sheet: TimesheetData {
                day_settings,
                working_time_days,
                list_of_salary_time: vec![
                    salary_row(1, "Komp", true, true, true),
                    salary_row(10, "Overtime", false, true, false),
                ],
                list_of_salary_activities: vec![
                    SalaryActivityOption { key: 10, value: "Overtime".into() },
                    SalaryActivityOption { key: 20, value: "Sick".into() },
                ],
                list_of_project_time: vec![project_row(100, "Development", [0; DAYS_IN_WEEK])],
                summary_data: SummaryData {
                    has_schedule: true,
                    scheduled_hours: 40.0,
                    worked_hours: 40.0,
                    ..SummaryData::default()
                },
                ..TimesheetData::default()
            },
        }
    }

    pub(crate) fn span() -> WeekSpan {
        let wednesday = Stockholm.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap();
        WeekSpan::containing(&wednesday, Stockholm).unwrap()
    }

    pub(crate) fn salary(
        mut self,
        id: ActivityId,
        name: &str,
        allow_negative: bool,
        allow_positive: bool,
        is_default: bool,
    ) -> Self {
        self.sheet
            .list_of_salary_time
            .push(salary_row(id, name, allow_negative, allow_positive, is_default));
        self
    }

    pub(crate) fn project(mut self, id: ActivityId, name: &str, minutes: [i32; DAYS_IN_WEEK]) -> Self {
        self.sheet.list_of_project_time.push(project_row(id, name, minutes));
        self
    }

    pub(crate) fn summary(mut self, has_schedule: bool, scheduled_hours: f64, worked_hours: f64) -> Self {
        self.sheet.summary_data.has_schedule = has_schedule;
        self.sheet.summary_data.scheduled_hours = scheduled_hours;
        self.sheet.summary_data.worked_hours = worked_hours;
        self
    }

    pub(crate) fn blank_working_time(mut self) -> Self {
        for row in &mut self.sheet.working_time_days {
            row.arrive = 0;
            row.leave = 0;
            row.lunch = 0;
            row.total = 0;
        }
        self
    }

    pub(crate) fn build(self) -> TimesheetData {
        self.sheet
    }
}

/// Port that answers from fixed data and accepts every save unless told
/// otherwise.
#[derive(Default)]
pub(crate) struct StaticApi {
    sheet: TimesheetData,
    salary_records: Vec<SalaryTime>,
    companies: Vec<ProjectCompany>,
    project_activities: HashMap<i64, Vec<ProjectActivityListItem>>,
    working_rejection: Option<String>,
}

impl StaticApi {
    pub(crate) fn new(sheet: TimesheetData) -> Self {
        Self { sheet, ..Self::default() }
    }

    pub(crate) fn with_salary_record(mut self, record: SalaryTime) -> Self {
        self.salary_records.push(record);
        self
    }

    pub(crate) fn with_companies(mut self, companies: Vec<ProjectCompany>) -> Self {
        self.companies = companies;
        self
    }

    pub(crate) fn with_project_activities(
        mut self,
        project_id: i64,
        activities: Vec<ProjectActivityListItem>,
    ) -> Self {
        self.project_activities.insert(project_id, activities);
        self
    }

    pub(crate) fn reject_working_time(mut self, message: &str) -> Self {
        self.working_rejection = Some(message.into());
        self
    }
}

impl TimesheetApi for StaticApi {
    fn fetch_timesheet(&self, _: &EmployeeId, _: &WeekSpan) -> Result<TimesheetData> {
        Ok(self.sheet.clone())
    }

    fn fetch_salary_activity(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<SalaryTime> {
        self.salary_records
            .iter()
            .find(|r| r.activity_id == id)
            .cloned()
            .ok_or_else(|| QbisError::NotFound(format!("salary activity {id}")))
    }

    fn fetch_project_activity(&self, _: &EmployeeId, _: &WeekSpan, id: ActivityId) -> Result<ProjectTime> {
        Err(QbisError::NotFound(format!("project activity {id}")))
    }

    fn salary_activity_overview(&self, _: &EmployeeId, _: &WeekSpan, _: ActivityId) -> Result<ActivityOverview> {
        Ok(ActivityOverview::default())
    }

    fn project_activity_overview(&self, _: &EmployeeId, _: &WeekSpan, _: ActivityId) -> Result<ActivityOverview> {
        Ok(ActivityOverview::default())
    }

    fn fetch_project_companies(&self, _: &EmployeeId, _: &WeekSpan) -> Result<Vec<ProjectCompany>> {
        Ok(self.companies.clone())
    }

    fn fetch_project_activities(
        &self,
        _: &EmployeeId,
        _: &WeekSpan,
        project_id: i64,
    ) -> Result<Vec<ProjectActivityListItem>> {
        self.project_activities
            .get(&project_id)
            .cloned()
            .ok_or_else(|| QbisError::Transport(format!("no activities scripted for project {project_id}")))
    }

    fn save_salary_time(&self, _: &EmployeeSalaryTime) -> Result<SaveSalaryTimeResponse> {
        Ok(SaveSalaryTimeResponse { was_saved: true, ..SaveSalaryTimeResponse::default() })
    }

    fn save_working_time(&self, _: &EmployeeWorkingTime) -> Result<SaveWorkingTimeResponse> {
        Ok(SaveWorkingTimeResponse { saved: self.working_rejection.clone(), ..SaveWorkingTimeResponse::default() })
    }

    fn save_project_time(&self, _: &EmployeeProjectTime) -> Result<SaveProjectTimeResponse> {
        Ok(SaveProjectTimeResponse { was_saved: true, ..SaveProjectTimeResponse::default() })
    }
}

pub(crate) fn week_with(sheet: TimesheetData) -> Week {
    week_on(StaticApi::new(sheet))
}

pub(crate) fn week_on(api: StaticApi) -> Week {
    Week::fetch(Arc::new(api), EmployeeId::parse("4711").unwrap(), SheetBuilder::span()).unwrap()
}
