//! Local-zone time arithmetic for attendance accounting.
//!
//! The engine operates in a single fixed-offset local zone (UTC+8, no DST).
//! All computations are done on integer milliseconds since the Unix epoch;
//! helpers here project local wall-clock values to UTC and back.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Fixed local zone offset, in hours east of UTC.
pub const LOCAL_OFFSET_HOURS: i32 = 8;

/// Fixed local zone offset, in milliseconds.
pub const LOCAL_OFFSET_MS: i64 = (LOCAL_OFFSET_HOURS as i64) * MS_PER_HOUR;

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// The engine's local zone as a chrono offset.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_OFFSET_HOURS * 3600).expect("valid fixed offset")
}

/// Local calendar date of a UTC instant.
pub fn work_date_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&local_offset()).date_naive()
}

/// Milliseconds since epoch for a UTC instant.
pub fn to_ms(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// UTC instant from milliseconds since epoch.
pub fn from_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Project a local wall-clock `(date, time)` to UTC milliseconds.
pub fn local_to_utc_ms(date: NaiveDate, time: NaiveTime) -> i64 {
    date.and_time(time).and_utc().timestamp_millis() - LOCAL_OFFSET_MS
}

/// UTC milliseconds of local midnight on `date`.
pub fn local_midnight_ms(date: NaiveDate) -> i64 {
    local_to_utc_ms(date, NaiveTime::MIN)
}

/// Last representable instant of the local work day: next local midnight
/// minus one millisecond, as UTC milliseconds.
pub fn end_of_work_day_ms(date: NaiveDate) -> i64 {
    local_midnight_ms(date) + MS_PER_DAY - 1
}

/// Parse an `HH:MM` wall-clock string.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Round a millisecond span to hours with 2-decimal payroll precision.
pub fn round_hours(ms: i64) -> f64 {
    round2(ms as f64 / MS_PER_HOUR as f64)
}

/// Round a millisecond span to the nearest whole minute.
pub fn round_minutes(ms: i64) -> i64 {
    (ms as f64 / MS_PER_MINUTE as f64).round() as i64
}

/// Round an hour value to 2 decimals. Accumulated totals re-round after
/// every addition so stored values stay at display precision.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
