// Calendar bucketing: timestamp parsing and hour/day/month keys
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq)]
pub enum CalendarError {
    #[error("unrecognised timestamp '{0}'")]
    Timestamp(String),
    #[error("unrecognised date '{0}', expected YYYY-MM-DD")]
    Date(String),
}

/// Parse a wall-clock timestamp without any timezone conversion.
///
/// Offsets on RFC 3339 input are dropped and the local wall clock is kept,
/// since the source strings are already in the display timezone.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CalendarError> {
    let raw = raw.trim();

    for format in DATE_TIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_local());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(CalendarError::Timestamp(raw.to_string()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CalendarError::Date(raw.to_string()))
}

/// Timestamp truncated to the start of its hour
pub fn hour_key(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN) + chrono::Duration::hours(i64::from(ts.hour()))
}

pub fn day_key(ts: NaiveDateTime) -> NaiveDate {
    ts.date()
}

pub fn month_key(ts: NaiveDateTime) -> YearMonth {
    YearMonth {
        year: ts.year(),
        month: ts.month(),
    }
}

pub fn hour_of_day(ts: NaiveDateTime) -> u32 {
    ts.hour()
}

/// Fractional days elapsed from `start` to `end`
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn format_hour(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:00").to_string()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Minute precision unless the timestamp carries seconds or a fraction
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    let format = if ts.nanosecond() != 0 {
        "%Y-%m-%dT%H:%M:%S%.f"
    } else if ts.second() != 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%dT%H:%M"
    };
    ts.format(format).to_string()
}

/// Calendar month of a specific year; orders chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
