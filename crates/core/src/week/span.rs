//! Monday to Sunday span of qbis dates

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use chrono_tz::Tz;
use qbis_domain::dates::{encode_iso, local_midnight};
use qbis_domain::{QbisDate, QbisError, Result};

/// Days in a timesheet week.
pub const DAYS_IN_WEEK: usize = 7;

/// First and last qbis date of a week, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    start: QbisDate,
    end: QbisDate,
}

impl WeekSpan {
    /// The week around `instant`, with calendar days taken in `tz`.
    ///
    /// # Errors
    /// Returns `QbisError::Invariant` if a midnight cannot be resolved in
    /// `tz`, or the week runs off the supported calendar.
    pub fn containing<Z: TimeZone>(instant: &DateTime<Z>, tz: Tz) -> Result<Self> {
        let date = instant.with_timezone(&tz).date_naive();
        let back = u64::from(date.weekday().num_days_from_monday());

        let monday = date
            .checked_sub_days(Days::new(back))
            .ok_or_else(|| QbisError::Invariant(format!("no monday before {date}")))?;
        let sunday = monday
            .checked_add_days(Days::new(6))
            .ok_or_else(|| QbisError::Invariant(format!("no sunday after {monday}")))?;

        Ok(Self { start: local_midnight(monday, tz)?, end: local_midnight(sunday, tz)? })
    }

    /// Monday 00:00 local.
    pub fn start(&self) -> &QbisDate {
        &self.start
    }

    /// Sunday 00:00 local.
    pub fn end(&self) -> &QbisDate {
        &self.end
    }

    pub fn tz(&self) -> Tz {
        self.start.timezone()
    }

    /// `fromDate` query and payload value.
    pub fn from_iso(&self) -> String {
        encode_iso(&self.start)
    }

    /// `toDate` query and payload value.
    pub fn to_iso(&self) -> String {
        encode_iso(&self.end)
    }

    /// The seven calendar dates, Monday first.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.date_naive().iter_days().take(DAYS_IN_WEEK).collect()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        (self.start.date_naive()..=self.end.date_naive()).contains(&date)
    }
}
