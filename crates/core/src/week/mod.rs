//! Week aggregate
//!
//! A [`Week`] owns one fetched timesheet snapshot and a dirty flag. It is
//! read and mutated through [`Day`] views and activity accessors, and
//! written back with [`Week::save`].
//!
//! A week is single-writer: every mutator takes `&mut self`. Sharing one
//! week between threads requires external locking.

mod day;
mod save;
mod span;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;
use qbis_domain::dates::decode_wire_date;
use qbis_domain::{
    ActivityId, ActivityOverview, EmployeeId, ProjectTime, QbisError, Result, SalaryTime,
    TimesheetData, WeekStatus,
};
use tracing::debug;

pub use day::{Day, DayHandle};
pub use save::{SaveReport, SaveState};
pub use span::{WeekSpan, DAYS_IN_WEEK};

use crate::ports::TimesheetApi;
use crate::registry::{self, ProjectActivity, ProjectCatalog, SalaryActivity};

/// One week of an employee's timesheet.
pub struct Week {
    api: Arc<dyn TimesheetApi>,
    employee: EmployeeId,
    span: WeekSpan,
    sheet: TimesheetData,
    /// Local calendar date of each day index.
    dates: Vec<NaiveDate>,
    dirty: bool,
    /// Bumped whenever the snapshot is replaced.
    generation: u64,
    last_save: SaveState,
}

impl fmt::Debug for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Week")
            .field("employee", &self.employee)
            .field("span", &self.span)
            .field("dates", &self.dates)
            .field("dirty", &self.dirty)
            .field("generation", &self.generation)
            .field("last_save", &self.last_save)
            .finish_non_exhaustive()
    }
}

impl Week {
    /// Fetch the snapshot for `span`.
    ///
    /// # Errors
    /// Propagates transport and decoding errors of the fetch. Returns
    /// `Format` if the day-indexed arrays disagree with each other or with
    /// the seven dates of `span`, and
    /// `Invariant` if more than one salary activity is flagged default.
    pub fn fetch(api: Arc<dyn TimesheetApi>, employee: EmployeeId, span: WeekSpan) -> Result<Self> {
        let sheet = api.fetch_timesheet(&employee, &span)?;
        let dates = validate_snapshot(&sheet, &span)?;
        debug!(
            employee_id = %employee,
            from = %span.from_iso(),
            days = dates.len(),
            salary_rows = sheet.list_of_salary_time.len(),
            project_rows = sheet.list_of_project_time.len(),
            "Fetched timesheet"
        );

        Ok(Self {
            api,
            employee,
            span,
            sheet,
            dates,
            dirty: false,
            generation: 0,
            last_save: SaveState::Clean,
        })
    }

    /// Re-fetch and replace the snapshot, discarding unsaved edits.
    ///
    /// Every [`DayHandle`] issued before this call becomes stale and the
    /// outcome of an earlier save is forgotten.
    ///
    /// # Errors
    /// Same as [`Week::fetch`]. The current snapshot is kept on error.
    pub fn update(&mut self) -> Result<()> {
        self.replace_snapshot()?;
        self.last_save = SaveState::Clean;
        Ok(())
    }

    pub(crate) fn replace_snapshot(&mut self) -> Result<()> {
        let sheet = self.api.fetch_timesheet(&self.employee, &self.span)?;
        let dates = validate_snapshot(&sheet, &self.span)?;

        self.sheet = sheet;
        self.dates = dates;
        self.dirty = false;
        self.generation = self.generation.wrapping_add(1);
        debug!(employee_id = %self.employee, generation = self.generation, "Replaced timesheet snapshot");
        Ok(())
    }

    /// The week this snapshot covers.
    pub fn span(&self) -> &WeekSpan {
        &self.span
    }

    /// Owner of the timesheet.
    pub fn employee(&self) -> &EmployeeId {
        &self.employee
    }

    /// Zone the day dates are resolved in.
    pub fn tz(&self) -> Tz {
        self.span.tz()
    }

    /// The snapshot as currently held, including local edits.
    pub fn snapshot(&self) -> &TimesheetData {
        &self.sheet
    }

    /// True if the snapshot carries unsaved local edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bumped each time the snapshot is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Outcome of the most recent save attempt.
    pub fn last_save(&self) -> SaveState {
        self.last_save
    }

    pub(crate) fn api(&self) -> &dyn TimesheetApi {
        self.api.as_ref()
    }

    // ---- summary ----

    pub fn status(&self) -> WeekStatus {
        self.sheet.summary_data.status()
    }

    pub fn is_open(&self) -> bool {
        self.status() == WeekStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status() == WeekStatus::Closed
    }

    /// Approved by a manager.
    pub fn is_approved(&self) -> bool {
        self.status() == WeekStatus::Approved
    }

    /// Scheduled minutes for the week, 0 without a schedule.
    pub fn scheduled_minutes(&self) -> i64 {
        let summary = &self.sheet.summary_data;
        if summary.has_schedule {
            hours_to_minutes(summary.scheduled_hours)
        } else {
            0
        }
    }

    /// Worked minutes for the week.
    ///
    /// The server summary is stale once the week is edited, so a dirty
    /// week sums the logged minutes of its days instead.
    ///
    /// # Errors
    /// Returns `Invariant` if an edited day has negative logged minutes.
    pub fn worked_minutes(&self) -> Result<i64> {
        if !self.dirty {
            return Ok(hours_to_minutes(self.sheet.summary_data.worked_hours));
        }
        (0..self.dates.len()).try_fold(0_i64, |sum, index| {
            Ok(sum + i64::from(self.logged_minutes_at(index)?))
        })
    }

    /// Worked minus scheduled minutes; negative when short.
    ///
    /// # Errors
    /// See [`Week::worked_minutes`].
    pub fn overtime_minutes(&self) -> Result<i64> {
        Ok(self.worked_minutes()? - self.scheduled_minutes())
    }

    // ---- days ----

    /// Calendar dates of the week, in day-index order.
    pub fn days(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The day containing `instant`.
    ///
    /// # Errors
    /// Returns `NotFound` if the local date of `instant` is outside the week.
    pub fn day<Z: TimeZone>(&mut self, instant: &DateTime<Z>) -> Result<Day<'_>> {
        let date = instant.with_timezone(&self.tz()).date_naive();
        self.day_of(date)
    }

    /// The day with calendar date `date`.
    ///
    /// # Errors
    /// Returns `NotFound` if `date` is outside the week.
    pub fn day_of(&mut self, date: NaiveDate) -> Result<Day<'_>> {
        let index = self.index_of(date)?;
        Ok(Day::new(self, index))
    }

    /// # Errors
    /// Returns `NotFound` if no day of the snapshot falls on `weekday`.
    pub fn weekday(&mut self, weekday: Weekday) -> Result<Day<'_>> {
        let index = self
            .dates
            .iter()
            .position(|d| d.weekday() == weekday)
            .ok_or_else(|| QbisError::NotFound(format!("{weekday} in week of {}", self.span.from_iso())))?;
        Ok(Day::new(self, index))
    }

    /// A detached reference to the day containing `instant`.
    ///
    /// # Errors
    /// Returns `NotFound` if the local date of `instant` is outside the week.
    pub fn day_handle<Z: TimeZone>(&self, instant: &DateTime<Z>) -> Result<DayHandle> {
        let date = instant.with_timezone(&self.tz()).date_naive();
        let index = self.index_of(date)?;
        Ok(DayHandle::new(index, date, self.generation))
    }

    /// Re-bind a handle obtained earlier.
    ///
    /// # Errors
    /// Returns `Invariant` if the snapshot was replaced since the handle
    /// was issued.
    pub fn day_at(&mut self, handle: DayHandle) -> Result<Day<'_>> {
        let index = self.check_handle(handle)?;
        Ok(Day::new(self, index))
    }

    fn index_of(&self, date: NaiveDate) -> Result<usize> {
        self.dates
            .iter()
            .position(|d| *d == date)
            .ok_or_else(|| QbisError::NotFound(format!("{date} is not part of week {}", self.span.from_iso())))
    }

    fn check_handle(&self, handle: DayHandle) -> Result<usize> {
        if handle.generation() != self.generation {
            return Err(QbisError::Invariant(format!(
                "day handle for {} is stale (generation {} != {})",
                handle.date(),
                handle.generation(),
                self.generation
            )));
        }
        Ok(handle.index())
    }

    // ---- activity records ----

    /// Index of the salary record for `activity_id`, fetching and
    /// appending it when the week does not contain it yet.
    ///
    /// # Errors
    /// Any error of the lazy fetch, wrapped in `ActivityLookup`.
    pub fn find_or_fetch_salary(&mut self, activity_id: ActivityId) -> Result<usize> {
        if let Some(index) = self.salary_row(activity_id) {
            return Ok(index);
        }
        let record = self
            .fetch_salary_record(activity_id)
            .map_err(|e| QbisError::activity_lookup(activity_id, e))?;

        self.sheet.list_of_salary_time.push(record);
        debug!(activity_id, "Added salary activity to week");
        Ok(self.sheet.list_of_salary_time.len() - 1)
    }

    /// Project counterpart of [`Week::find_or_fetch_salary`].
    ///
    /// # Errors
    /// Any error of the lazy fetch, wrapped in `ActivityLookup`.
    pub fn find_or_fetch_project(&mut self, activity_id: ActivityId) -> Result<usize> {
        if let Some(index) = self.project_row(activity_id) {
            return Ok(index);
        }
        let record = self
            .fetch_project_record(activity_id)
            .map_err(|e| QbisError::activity_lookup(activity_id, e))?;

        self.sheet.list_of_project_time.push(record);
        debug!(activity_id, "Added project activity to week");
        Ok(self.sheet.list_of_project_time.len() - 1)
    }

    /// # Errors
    /// See [`Week::find_or_fetch_salary`].
    pub fn lookup_salary_record(&mut self, activity_id: ActivityId) -> Result<&SalaryTime> {
        let row = self.find_or_fetch_salary(activity_id)?;
        Ok(&self.sheet.list_of_salary_time[row])
    }

    /// # Errors
    /// See [`Week::find_or_fetch_project`].
    pub fn lookup_project_record(&mut self, activity_id: ActivityId) -> Result<&ProjectTime> {
        let row = self.find_or_fetch_project(activity_id)?;
        Ok(&self.sheet.list_of_project_time[row])
    }

    fn salary_row(&self, activity_id: ActivityId) -> Option<usize> {
        self.sheet.list_of_salary_time.iter().position(|r| r.activity_id == activity_id)
    }

    fn project_row(&self, activity_id: ActivityId) -> Option<usize> {
        self.sheet.list_of_project_time.iter().position(|r| r.activity_id == activity_id)
    }

    fn fetch_salary_record(&self, activity_id: ActivityId) -> Result<SalaryTime> {
        let record = self.api.fetch_salary_activity(&self.employee, &self.span, activity_id)?;
        check_returned_id(activity_id, record.activity_id)?;
        check_day_count(activity_id, record.days.len(), self.dates.len())?;
        if record.is_default && self.sheet.list_of_salary_time.iter().any(|r| r.is_default) {
            return Err(QbisError::Invariant(
                "week would hold more than one default salary activity".into(),
            ));
        }
        Ok(record)
    }

    fn fetch_project_record(&self, activity_id: ActivityId) -> Result<ProjectTime> {
        let record = self.api.fetch_project_activity(&self.employee, &self.span, activity_id)?;
        check_returned_id(activity_id, record.activity_id)?;
        check_day_count(activity_id, record.days.len(), self.dates.len())?;
        Ok(record)
    }

    // ---- slot mutators addressed by day handle ----

    /// Set salary minutes of `activity_id` on `day`.
    ///
    /// # Errors
    /// `Invariant` for a stale handle, `Policy` if the activity's sign
    /// policy forbids the value, or any lookup error.
    pub fn set_salary_minutes(
        &mut self,
        day: DayHandle,
        activity_id: ActivityId,
        minutes: i32,
    ) -> Result<()> {
        let index = self.check_handle(day)?;
        self.write_salary_minutes(index, activity_id, minutes)
    }

    /// # Errors
    /// `Invariant` for a stale handle or any lookup error.
    pub fn set_project_minutes(
        &mut self,
        day: DayHandle,
        activity_id: ActivityId,
        minutes: i32,
    ) -> Result<()> {
        let index = self.check_handle(day)?;
        self.write_project_minutes(index, activity_id, minutes)
    }

    /// Replace the notes given as `Some`, keep the others.
    ///
    /// # Errors
    /// `Invariant` for a stale handle or any lookup error.
    pub fn set_project_notes(
        &mut self,
        day: DayHandle,
        activity_id: ActivityId,
        internal: Option<&str>,
        external: Option<&str>,
    ) -> Result<()> {
        let index = self.check_handle(day)?;
        self.write_project_notes(index, activity_id, internal, external)
    }

    pub(crate) fn salary_minutes_at(&mut self, index: usize, activity_id: ActivityId) -> Result<i32> {
        let row = self.find_or_fetch_salary(activity_id)?;
        Ok(self.sheet.list_of_salary_time[row].days[index].day_minutes)
    }

    pub(crate) fn write_salary_minutes(
        &mut self,
        index: usize,
        activity_id: ActivityId,
        minutes: i32,
    ) -> Result<()> {
        let row = self.find_or_fetch_salary(activity_id)?;
        let record = &mut self.sheet.list_of_salary_time[row];
        check_sign_policy(record, minutes)?;

        record.days[index].day_minutes = minutes;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn project_day_at(
        &mut self,
        index: usize,
        activity_id: ActivityId,
    ) -> Result<&qbis_domain::ProjectDay> {
        let row = self.find_or_fetch_project(activity_id)?;
        Ok(&self.sheet.list_of_project_time[row].days[index])
    }

    pub(crate) fn write_project_minutes(
        &mut self,
        index: usize,
        activity_id: ActivityId,
        minutes: i32,
    ) -> Result<()> {
        let row = self.find_or_fetch_project(activity_id)?;
        self.sheet.list_of_project_time[row].days[index].day_minutes = minutes;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn write_project_notes(
        &mut self,
        index: usize,
        activity_id: ActivityId,
        internal: Option<&str>,
        external: Option<&str>,
    ) -> Result<()> {
        let row = self.find_or_fetch_project(activity_id)?;
        let slot = &mut self.sheet.list_of_project_time[row].days[index];
        if let Some(note) = internal {
            slot.internal_notes = note.to_owned();
        }
        if let Some(note) = external {
            slot.external_notes = note.to_owned();
        }
        if internal.is_some() || external.is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    // ---- working time ----

    pub(crate) fn working_time_at(&self, index: usize) -> &qbis_domain::WorkingTime {
        &self.sheet.working_time_days[index]
    }

    pub(crate) fn set_clock_time<Z: TimeZone>(
        &mut self,
        index: usize,
        at: &DateTime<Z>,
        field: ClockField,
    ) -> Result<()> {
        let local = at.with_timezone(&self.tz());
        let expected = self.dates[index];
        if local.date_naive() != expected {
            return Err(QbisError::Invariant(format!(
                "{field} {} is not on {expected}",
                local.to_rfc3339()
            )));
        }

        let minutes = minutes_since_midnight(&local);
        let row = &mut self.sheet.working_time_days[index];
        match field {
            ClockField::Arrival => row.arrive = minutes,
            ClockField::Departure => row.leave = minutes,
        }
        row.is_modified = true;
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn set_break_minutes_at(&mut self, index: usize, minutes: u16) {
        let row = &mut self.sheet.working_time_days[index];
        row.lunch = i32::from(minutes);
        row.is_modified = true;
        self.dirty = true;
    }

    /// Server total while unmodified, otherwise departure minus arrival
    /// minus break.
    pub(crate) fn logged_minutes_at(&self, index: usize) -> Result<i32> {
        let row = &self.sheet.working_time_days[index];
        if !row.is_modified {
            return Ok(row.total);
        }
        let minutes = row
            .leave
            .checked_sub(row.arrive)
            .and_then(|m| m.checked_sub(row.lunch))
            .ok_or_else(|| {
                QbisError::Invariant(format!(
                    "{}: departure {} minus arrival {} minus break {} overflows",
                    self.dates[index], row.leave, row.arrive, row.lunch
                ))
            })?;
        if minutes < 0 {
            return Err(QbisError::Invariant(format!(
                "{}: departure {} minus arrival {} minus break {} is negative",
                self.dates[index], row.leave, row.arrive, row.lunch
            )));
        }
        Ok(minutes)
    }

    // ---- registries ----

    /// Salary activities the employee may log: the default first, then
    /// the catalog.
    ///
    /// # Errors
    /// Returns `Invariant` if the week holds more than one default activity.
    pub fn salary_activities(&self) -> Result<Vec<SalaryActivity<'_>>> {
        registry::salary::available(self)
    }

    /// Salary activities present in the snapshot, default first.
    ///
    /// # Errors
    /// Returns `Invariant` if the week holds more than one default activity.
    pub fn salary_activities_in_week(&self) -> Result<Vec<SalaryActivity<'_>>> {
        registry::salary::in_week(self)
    }

    /// Project activities with minutes in this week.
    pub fn project_activities_in_week(&self) -> Vec<ProjectActivity<'_>> {
        registry::project::in_week(self)
    }

    /// Company, project and activity tree available to the employee.
    ///
    /// # Errors
    /// Propagates errors of the company listing.
    pub fn project_catalog(&self) -> Result<ProjectCatalog<'_>> {
        ProjectCatalog::load(self)
    }

    /// # Errors
    /// Propagates errors of the overview fetch.
    pub fn salary_activity_overview(&self, activity_id: ActivityId) -> Result<ActivityOverview> {
        self.api.salary_activity_overview(&self.employee, &self.span, activity_id)
    }

    /// # Errors
    /// Propagates errors of the overview fetch.
    pub fn project_activity_overview(&self, activity_id: ActivityId) -> Result<ActivityOverview> {
        self.api.project_activity_overview(&self.employee, &self.span, activity_id)
    }
}

/// Which clock time of a working day is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClockField {
    Arrival,
    Departure,
}

impl fmt::Display for ClockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arrival => "arrival",
            Self::Departure => "departure",
        })
    }
}

/// Wall-clock minutes, at most 1439.
#[allow(clippy::cast_possible_wrap)]
fn minutes_since_midnight(local: &DateTime<Tz>) -> i32 {
    (local.hour() * 60 + local.minute()) as i32
}

#[allow(clippy::cast_possible_truncation)]
fn hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

fn check_sign_policy(record: &SalaryTime, minutes: i32) -> Result<()> {
    if minutes < 0 && !record.allow_negative {
        return Err(QbisError::Policy(format!(
            "salary activity '{}' ({}) does not allow negative minutes: {minutes}",
            record.activity_name, record.activity_id
        )));
    }
    if minutes > 0 && !record.allow_positive {
        return Err(QbisError::Policy(format!(
            "salary activity '{}' ({}) does not allow positive minutes: {minutes}",
            record.activity_name, record.activity_id
        )));
    }
    Ok(())
}

fn check_returned_id(requested: ActivityId, returned: ActivityId) -> Result<()> {
    if requested == returned {
        Ok(())
    } else {
        Err(QbisError::NotFound(format!(
            "service answered activity {returned} when asked for {requested}"
        )))
    }
}

fn check_day_count(activity_id: ActivityId, got: usize, expected: usize) -> Result<()> {
    if got == expected {
        Ok(())
    } else {
        Err(QbisError::Format(format!(
            "activity {activity_id} has {got} day slots, week has {expected}"
        )))
    }
}

fn local_date(wire: &str, tz: Tz) -> Result<NaiveDate> {
    Ok(decode_wire_date(wire)?.with_timezone(&tz).date_naive())
}

/// Check the day-indexed arrays of a snapshot line up with each other and
/// with the days of `span`, and return the local date of each index.
fn validate_snapshot(sheet: &TimesheetData, span: &WeekSpan) -> Result<Vec<NaiveDate>> {
    let tz = span.tz();
    let expected = span.dates();
    let days = sheet.day_settings.len();
    if days != expected.len() {
        return Err(QbisError::Format(format!(
            "snapshot has {days} day settings, a week has {}",
            expected.len()
        )));
    }
    if sheet.working_time_days.len() != days {
        return Err(QbisError::Format(format!(
            "{days} day settings but {} working time days",
            sheet.working_time_days.len()
        )));
    }

    let mut dates = Vec::with_capacity(days);
    for ((setting, working), want) in sheet.day_settings.iter().zip(&sheet.working_time_days).zip(&expected) {
        let date = local_date(&setting.day_date, tz)?;
        if date != *want {
            return Err(QbisError::Format(format!("snapshot day {date} found where {want} was expected")));
        }
        let working_date = local_date(&working.day_date, tz)?;
        if working_date != date {
            return Err(QbisError::Format(format!(
                "working time row for {working_date} found where {date} was expected"
            )));
        }
        dates.push(date);
    }

    for row in &sheet.list_of_salary_time {
        check_day_count(row.activity_id, row.days.len(), days)?;
    }
    for row in &sheet.list_of_project_time {
        check_day_count(row.activity_id, row.days.len(), days)?;
    }

    let defaults = sheet.list_of_salary_time.iter().filter(|r| r.is_default).count();
    if defaults > 1 {
        return Err(QbisError::Invariant(format!(
            "{defaults} salary activities are flagged default, at most one is allowed"
        )));
    }

    Ok(dates)
}
