//! Date codec for the Qbis wire formats
//!
//! The service speaks two date dialects:
//! - `/Date(<seconds>000)/` in every JSON payload it returns
//! - ISO-8601 UTC with milliseconds (`2024-01-15T00:00:00.000Z`) in query
//!   strings and save payloads
//!
//! Calendar days are represented as *qbis dates*: midnight in the user's
//! local timezone. The wire format round-trips through UTC, so a qbis date
//! serialized for a zone east of Greenwich lands on the previous UTC day.
//! Day identity must therefore always be compared in the local zone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{QbisError, Result};

/// A timestamp normalized to local midnight.
pub type QbisDate = DateTime<Tz>;

static WIRE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/Date\((\d+?)000\)/$").expect("WIRE_DATE pattern should compile - this is a bug")
});

/// Parse a `/Date(<seconds>000)/` string into an instant.
///
/// # Errors
/// Returns `QbisError::Format` if the string does not match the pattern or
/// the seconds do not fit a valid timestamp.
pub fn decode_wire_date(value: &str) -> Result<DateTime<Utc>> {
    let captures = WIRE_DATE
        .captures(value)
        .ok_or_else(|| QbisError::Format(format!("not a wire date: '{value}'")))?;

    let seconds: i64 = captures[1]
        .parse()
        .map_err(|e| QbisError::Format(format!("wire date '{value}' out of range: {e}")))?;

    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| QbisError::Format(format!("wire date '{value}' out of range")))
}

/// Render an instant as `/Date(<seconds>000)/`. Sub-second precision is dropped.
/// The wire format carries no sign, so instants before 1970 do not decode.
pub fn encode_wire_date<Z: TimeZone>(instant: &DateTime<Z>) -> String {
    format!("/Date({}000)/", instant.timestamp())
}

/// Render an instant as UTC ISO-8601 with millisecond precision and a `Z` suffix.
pub fn encode_iso<Z: TimeZone>(instant: &DateTime<Z>) -> String {
    instant.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Re-encode a wire date as the ISO string the save endpoints expect.
///
/// # Errors
/// Returns `QbisError::Format` if `value` is not a wire date.
pub fn wire_date_to_iso(value: &str) -> Result<String> {
    decode_wire_date(value).map(|instant| encode_iso(&instant))
}

/// Truncate an instant to midnight of its calendar day in `tz`.
///
/// # Errors
/// Returns `QbisError::Invariant` if the day has no representable start in
/// `tz`, which no real zone produces.
pub fn qbis_date_of<Z: TimeZone>(instant: &DateTime<Z>, tz: Tz) -> Result<QbisDate> {
    local_midnight(instant.with_timezone(&tz).date_naive(), tz)
}

/// Midnight of `date` in `tz`.
///
/// On a fall-back transition at midnight the earlier instant wins; when
/// midnight falls into a spring-forward gap the day starts at the first
/// valid local time.
///
/// # Errors
/// Returns `QbisError::Invariant` if no start of day can be found.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> Result<QbisDate> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(start) => Ok(start),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| QbisError::Invariant(format!("{date} has no start of day in {tz}"))),
    }
}

/// True if both instants fall on the same local calendar day in `tz`.
pub fn same_qbis_day<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>, tz: Tz) -> bool {
    a.with_timezone(&tz).date_naive() == b.with_timezone(&tz).date_naive()
}
