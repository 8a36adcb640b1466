//! Week snapshot builder
//!
//! Builds the week of 2024-01-15 in Europe/Stockholm the way the service
//! returns it: `/Date(...)/` day dates, one slot per day in every
//! day-indexed array.

use chrono::TimeZone;
use chrono_tz::Europe::Stockholm;
use qbis_core::WeekSpan;
use qbis_domain::{
    ActivityDay, ActivityId, DaySetting, EmployeeId, ProjectDay, ProjectTime, SalaryActivityOption,
    SalaryTime, ScheduleDay, SummaryData, TimesheetData, WorkingTime,
};

/// Monday 2024-01-15 00:00 local.
const MONDAY: i64 = 1_705_273_200;
const DAYS: usize = 7;

pub fn wire_day(index: usize) -> String {
    format!("/Date({}000)/", MONDAY + 86_400 * index as i64)
}

pub fn employee() -> EmployeeId {
    EmployeeId::parse("4711").unwrap()
}

pub fn span() -> WeekSpan {
    let wednesday = Stockholm.with_ymd_and_hms(2024, 1, 17, 12, 0, 0).unwrap();
    WeekSpan::containing(&wednesday, Stockholm).unwrap()
}

pub fn salary_record(id: ActivityId, name: &str, allow_negative: bool, allow_positive: bool) -> SalaryTime {
    SalaryTime {
        activity_id: id,
        activity_name: name.into(),
        days: (0..DAYS)
            .map(|i| ActivityDay { day_date: wire_day(i), ..ActivityDay::default() })
            .collect(),
        allow_negative,
        allow_positive,
        ..SalaryTime::default()
    }
}

pub fn project_record(id: ActivityId, name: &str) -> ProjectTime {
    ProjectTime {
        activity_id: id,
        activity_name: name.into(),
        project_name: "Portal".into(),
        customer_name: "Acme".into(),
        days: (0..DAYS)
            .map(|i| ProjectDay { day_date: wire_day(i), ..ProjectDay::default() })
            .collect(),
        ..ProjectTime::default()
    }
}

/// Fluent builder for [`TimesheetData`].
pub struct SheetBuilder {
    sheet: TimesheetData,
}

impl SheetBuilder {
    /// An open week with a komp default activity and nothing logged.
    pub fn new() -> Self {
        let day_settings = (0..DAYS)
            .map(|i| DaySetting {
                day_date: wire_day(i),
                has_schedule: i < 5,
                my_schedule: ScheduleDay { total_minutes: if i < 5 { 480 } else { 0 }, ..ScheduleDay::default() },
                ..DaySetting::default()
            })
            .collect();
        let working_time_days = (0..DAYS)
            .map(|i| WorkingTime { day_date: wire_day(i), ..WorkingTime::default() })
            .collect();

        let mut komp = salary_record(1, "Komp", true, true);
        komp.is_default = true;

        Self {
            sheet: TimesheetData {
                day_settings,
                working_time_days,
                list_of_salary_time: vec![komp],
                list_of_salary_activities: vec![
                    SalaryActivityOption { key: 10, value: "Overtime".into() },
                    SalaryActivityOption { key: 20, value: "Sick".into() },
                ],
                summary_data: SummaryData {
                    has_schedule: true,
                    scheduled_hours: 40.0,
                    ..SummaryData::default()
                },
                ..TimesheetData::default()
            },
        }
    }

    pub fn with_salary(mut self, record: SalaryTime) -> Self {
        self.sheet.list_of_salary_time.push(record);
        self
    }

    pub fn with_project(mut self, record: ProjectTime) -> Self {
        self.sheet.list_of_project_time.push(record);
        self
    }

    pub fn worked_hours(mut self, hours: f64) -> Self {
        self.sheet.summary_data.worked_hours = hours;
        self
    }

    pub fn build(self) -> TimesheetData {
        self.sheet
    }
}
