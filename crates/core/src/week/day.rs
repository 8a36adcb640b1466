//! Day view: one day index of the week snapshot

use chrono::{DateTime, NaiveDate, TimeZone};
use qbis_domain::dates::local_midnight;
use qbis_domain::{ActivityId, QbisDate, Result};

use super::{ClockField, Week};
use crate::registry::{self, ProjectActivity, SalaryActivity};

/// Borrowed view of one day. Holds no data; every accessor reads or
/// writes the owning week's snapshot at the day's index.
#[derive(Debug)]
pub struct Day<'w> {
    week: &'w mut Week,
    index: usize,
}

/// Copyable reference to a day, valid until the snapshot is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayHandle {
    index: usize,
    date: NaiveDate,
    generation: u64,
}

impl DayHandle {
    pub(crate) fn new(index: usize, date: NaiveDate, generation: u64) -> Self {
        Self { index, date, generation }
    }

    /// Position of the day in the week, Monday is 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Local date of the day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Snapshot generation the handle was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<'w> Day<'w> {
    pub(crate) fn new(week: &'w mut Week, index: usize) -> Self {
        Self { week, index }
    }

    /// Position within the week, 0 for the first day.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn date(&self) -> NaiveDate {
        self.week.dates[self.index]
    }

    /// Start of the day in the week's timezone.
    ///
    /// # Errors
    /// Returns `Invariant` if the day has no representable start.
    pub fn qbis_date(&self) -> Result<QbisDate> {
        local_midnight(self.date(), self.week.tz())
    }

    /// Detach from the borrow so the day can be found again later.
    pub fn handle(&self) -> DayHandle {
        DayHandle::new(self.index, self.date(), self.week.generation)
    }

    pub fn is_holiday(&self) -> bool {
        self.week.sheet.day_settings[self.index].is_holiday
    }

    /// Minutes the employer expects, 0 without a schedule.
    pub fn scheduled_minutes(&self) -> i32 {
        let setting = &self.week.sheet.day_settings[self.index];
        if setting.has_schedule {
            setting.my_schedule.total_minutes
        } else {
            0
        }
    }

    // ---- working time ----

    /// Arrival as minutes since local midnight.
    pub fn arrival_minutes(&self) -> i32 {
        self.week.working_time_at(self.index).arrive
    }

    /// Departure as minutes since local midnight.
    pub fn departure_minutes(&self) -> i32 {
        self.week.working_time_at(self.index).leave
    }

    pub fn break_minutes(&self) -> i32 {
        self.week.working_time_at(self.index).lunch
    }

    /// # Errors
    /// Returns `Invariant` if `at` falls on another calendar day. The
    /// snapshot is left untouched in that case.
    pub fn set_arrival<Z: TimeZone>(&mut self, at: &DateTime<Z>) -> Result<()> {
        self.week.set_clock_time(self.index, at, ClockField::Arrival)
    }

    /// # Errors
    /// Returns `Invariant` if `at` falls on another calendar day. The
    /// snapshot is left untouched in that case.
    pub fn set_departure<Z: TimeZone>(&mut self, at: &DateTime<Z>) -> Result<()> {
        self.week.set_clock_time(self.index, at, ClockField::Departure)
    }

    pub fn set_break_minutes(&mut self, minutes: u16) {
        self.week.set_break_minutes_at(self.index, minutes);
    }

    /// Minutes the employee reports as worked.
    ///
    /// # Errors
    /// Returns `Invariant` if edits make departure minus arrival minus
    /// break negative.
    pub fn logged_minutes(&self) -> Result<i32> {
        self.week.logged_minutes_at(self.index)
    }

    // ---- salary time ----

    /// Salary activities with time on this day, plus the default one.
    pub fn logged_salary_activities(&self) -> Vec<SalaryActivity<'_>> {
        registry::salary::logged_on(&*self.week, self.index)
    }

    /// # Errors
    /// Any error of the activity lookup.
    pub fn salary_minutes(&mut self, activity_id: ActivityId) -> Result<i32> {
        self.week.salary_minutes_at(self.index, activity_id)
    }

    /// # Errors
    /// `Policy` if the activity's sign policy forbids `minutes`, or any
    /// error of the activity lookup.
    pub fn set_salary_minutes(&mut self, activity_id: ActivityId, minutes: i32) -> Result<()> {
        self.week.write_salary_minutes(self.index, activity_id, minutes)
    }

    // ---- project time ----

    /// Project activities with minutes on this day.
    pub fn logged_project_activities(&self) -> Vec<ProjectActivity<'_>> {
        registry::project::logged_on(&*self.week, self.index)
    }

    /// # Errors
    /// Any error of the activity lookup.
    pub fn project_minutes(&mut self, activity_id: ActivityId) -> Result<i32> {
        Ok(self.week.project_day_at(self.index, activity_id)?.day_minutes)
    }

    /// # Errors
    /// Any error of the activity lookup.
    pub fn project_internal_notes(&mut self, activity_id: ActivityId) -> Result<String> {
        Ok(self.week.project_day_at(self.index, activity_id)?.internal_notes.clone())
    }

    /// # Errors
    /// Any error of the activity lookup.
    pub fn project_external_notes(&mut self, activity_id: ActivityId) -> Result<String> {
        Ok(self.week.project_day_at(self.index, activity_id)?.external_notes.clone())
    }

    /// # Errors
    /// Any error of the activity lookup.
    pub fn set_project_minutes(&mut self, activity_id: ActivityId, minutes: i32) -> Result<()> {
        self.week.write_project_minutes(self.index, activity_id, minutes)
    }

    /// Replace the notes given as `Some`.
    ///
    /// # Errors
    /// Any error of the activity lookup.
    pub fn set_project_notes(
        &mut self,
        activity_id: ActivityId,
        internal: Option<&str>,
        external: Option<&str>,
    ) -> Result<()> {
        self.week.write_project_notes(self.index, activity_id, internal, external)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use chrono_tz::Europe::Stockholm;
    use qbis_domain::QbisError;

    use super::super::fixtures::{week_with, SheetBuilder};
    use super::*;

    fn local(d: u32, h: u32, m: u32) -> DateTime<chrono_tz::Tz> {
        Stockholm.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    #[test]
    fn unmodified_day_trusts_server_total() {
        let mut week = week_with(SheetBuilder::new().build());
        let day = week.day(&local(15, 12, 0)).unwrap();
        assert_eq!(day.logged_minutes().unwrap(), 480);
        assert_eq!(day.scheduled_minutes(), 480);
        assert_eq!(day.arrival_minutes(), 480);
    }

    #[test]
    fn set_arrival_and_departure_recompute_logged_minutes() {
        let mut week = week_with(SheetBuilder::new().blank_working_time().build());
        let mut day = week.day(&local(15, 0, 0)).unwrap();

        day.set_arrival(&local(15, 8, 0)).unwrap();
        day.set_departure(&local(15, 17, 0)).unwrap();
        day.set_break_minutes(60);

        assert_eq!(day.arrival_minutes(), 480);
        assert_eq!(day.departure_minutes(), 1020);
        assert_eq!(day.logged_minutes().unwrap(), 480);
        assert!(week.is_dirty());
    }

    #[test]
    fn arrival_on_another_day_is_rejected() {
        let mut week = week_with(SheetBuilder::new().build());
        let mut day = week.day(&local(15, 0, 0)).unwrap();

        let err = day.set_arrival(&local(16, 8, 0)).unwrap_err();
        assert!(matches!(err, QbisError::Invariant(_)));
        assert_eq!(day.arrival_minutes(), 480);
        assert!(!week.is_dirty());
    }

    #[test]
    fn arrival_is_compared_in_local_time() {
        let mut week = week_with(SheetBuilder::new().blank_working_time().build());
        let mut day = week.day(&local(15, 0, 0)).unwrap();

        // 23:30 UTC on the 14th is 00:30 on the 15th in Stockholm.
        let just_after_midnight = Utc.with_ymd_and_hms(2024, 1, 14, 23, 30, 0).unwrap();
        day.set_arrival(&just_after_midnight).unwrap();
        assert_eq!(day.arrival_minutes(), 30);
    }

    #[test]
    fn departure_before_arrival_is_an_invariant_violation() {
        let mut week = week_with(SheetBuilder::new().blank_working_time().build());
        let mut day = week.day(&local(16, 0, 0)).unwrap();
        day.set_arrival(&local(16, 9, 0)).unwrap();
        day.set_departure(&local(16, 8, 0)).unwrap();

        assert!(matches!(day.logged_minutes(), Err(QbisError::Invariant(_))));
    }

    #[test]
    fn negative_salary_minutes_are_kept_until_save() {
        let mut week = week_with(SheetBuilder::new().build());
        let mut day = week.day(&local(15, 0, 0)).unwrap();

        day.set_salary_minutes(1, -90).unwrap();
        assert_eq!(day.salary_minutes(1).unwrap(), -90);

        let err = day.set_salary_minutes(10, -30).unwrap_err();
        assert!(matches!(err, QbisError::Policy(_)));
        assert_eq!(day.salary_minutes(10).unwrap(), 0);
    }

    #[test]
    fn project_notes_update_independently() {
        let mut week = week_with(SheetBuilder::new().build());
        let mut day = week.day(&local(17, 0, 0)).unwrap();

        day.set_project_minutes(100, 120).unwrap();
        day.set_project_notes(100, Some("pairing"), None).unwrap();
        day.set_project_notes(100, None, Some("Sprint 3")).unwrap();

        assert_eq!(day.project_minutes(100).unwrap(), 120);
        assert_eq!(day.project_internal_notes(100).unwrap(), "pairing");
        assert_eq!(day.project_external_notes(100).unwrap(), "Sprint 3");
        assert_eq!(day.logged_project_activities().len(), 1);
    }

    #[test]
    fn logged_salary_activities_include_default() {
        let mut week = week_with(SheetBuilder::new().build());
        let mut day = week.day(&local(18, 0, 0)).unwrap();
        assert_eq!(day.logged_salary_activities().len(), 1);

        day.set_salary_minutes(10, 60).unwrap();
        let ids: Vec<_> = day.logged_salary_activities().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![1, 10]);
    }
}
