//! Date/time helpers: epoch tick schemes and the textual formats accepted
//! when a string node is converted to a date.
//!
//! Three epoch schemes are supported:
//!
//! - **JavaScript ticks**: milliseconds since 1970-01-01T00:00:00Z
//! - **Unix timestamp**: seconds since 1970-01-01T00:00:00Z
//! - **Windows file time**: 100-nanosecond intervals since 1601-01-01T00:00:00Z

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Seconds between 1601-01-01 and 1970-01-01.
const WINDOWS_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;
const FILE_TIME_TICKS_PER_SECOND: i64 = 10_000_000;

/// Convert JavaScript ticks (ms since the Unix epoch) to a UTC date.
pub fn from_js_ticks(ticks: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ticks)
}

/// Convert a UTC date to JavaScript ticks. Sub-millisecond precision is dropped.
pub fn to_js_ticks(value: &DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub fn from_unix_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

pub fn to_unix_timestamp(value: &DateTime<Utc>) -> i64 {
    value.timestamp()
}

/// Convert a Windows file time to a UTC date.
pub fn from_windows_file_time(ticks: i64) -> Option<DateTime<Utc>> {
    let secs = ticks.div_euclid(FILE_TIME_TICKS_PER_SECOND) - WINDOWS_EPOCH_OFFSET_SECS;
    let nanos = ticks.rem_euclid(FILE_TIME_TICKS_PER_SECOND) * 100;
    DateTime::from_timestamp(secs, nanos as u32)
}

/// Convert a UTC date to a Windows file time, or `None` if it does not fit.
pub fn to_windows_file_time(value: &DateTime<Utc>) -> Option<i64> {
    let secs = value.timestamp().checked_add(WINDOWS_EPOCH_OFFSET_SECS)?;
    let ticks = secs.checked_mul(FILE_TIME_TICKS_PER_SECOND)?;
    ticks.checked_add(i64::from(value.timestamp_subsec_nanos() / 100))
}

/// Parse a date/time string.
///
/// Accepted forms, tried in order:
///
/// 1. RFC 3339 (`2024-03-01T08:30:00.123Z`, `2024-03-01T08:30:00+08:00`)
/// 2. RFC 2822 (`Fri, 01 Mar 2024 08:30:00 GMT`)
/// 3. Local-less date-time (`2024-03-01T08:30:00` or `2024-03-01 08:30:00`),
///    interpreted as UTC
/// 4. Date only (`2024-03-01`), midnight UTC
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Canonical text form of a date: RFC 3339, millisecond precision, `Z` suffix.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
