//! Month keys and entry dates
//!
//! Every record is bucketed by the calendar month of its date. The key is a
//! `(year, zero-based month index)` pair rendered as `"{year}-{index}"`, so
//! March 2024 is `"2024-2"`.
//!
//! Dates are calendar dates in the user's local time. A bare `YYYY-MM-DD` is
//! never shifted through UTC, and a full timestamp is converted to local time
//! before its date is taken, so an entry made late on the 31st stays in the
//! month the user sees.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifies one calendar month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month_index: u32,
}

impl MonthKey {
    /// Create a key from a year and a zero-based month index (0 = January)
    pub fn new(year: i32, month_index: u32) -> Result<Self, MonthKeyError> {
        if month_index > 11 {
            return Err(MonthKeyError::MonthOutOfRange(month_index));
        }
        Ok(Self { year, month_index })
    }

    /// Create a key from a year and a one-based calendar month (1 = January)
    pub fn from_calendar_month(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Self::new(year, month - 1)
    }

    /// The month a date belongs to
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index (0 = January)
    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    /// English month name, e.g. "March"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month_index as usize]
    }

    /// Human-readable label, e.g. "March 2024"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month_index)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || MonthKeyError::InvalidFormat(s.to_string());

        // rsplit so that a negative year still parses
        let (year, month) = s.rsplit_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month_index: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month_index)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Errors building or parsing a month key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyError {
    InvalidFormat(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for MonthKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month key '{}', expected YEAR-INDEX", s),
            Self::MonthOutOfRange(m) => write!(f, "Month out of range: {}", m),
        }
    }
}

impl std::error::Error for MonthKeyError {}

/// Parse an entry date in local calendar terms
///
/// Accepts `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM[:SS]` (as produced by
/// date-time pickers) and RFC 3339 timestamps, which are converted to local
/// time first.
pub fn parse_entry_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DateParseError::Missing);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp.with_timezone(&Local).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(local.date());
        }
    }

    Err(DateParseError::Invalid(s.to_string()))
}

/// Errors parsing an entry date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    Missing,
    Invalid(String),
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Date is required"),
            Self::Invalid(s) => write!(f, "Invalid date '{}', expected YYYY-MM-DD", s),
        }
    }
}

impl std::error::Error for DateParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_from_date_is_zero_based() {
        let key = MonthKey::from_date(date(2024, 3, 1));
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month_index(), 2);
        assert_eq!(key.to_string(), "2024-2");
        assert_eq!(key.month_name(), "March");
        assert_eq!(key.display_name(), "March 2024");
    }

    #[test]
    fn test_parse_round_trip() {
        let key: MonthKey = "2024-11".parse().unwrap();
        assert_eq!(key, MonthKey::new(2024, 11).unwrap());
        assert_eq!(key.to_string().parse::<MonthKey>().unwrap(), key);

        assert!("2024-12".parse::<MonthKey>().is_err());
        assert!("2024".parse::<MonthKey>().is_err());
        assert!("march-2024".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_calendar_month_conversion() {
        let key = MonthKey::from_calendar_month(2024, 3).unwrap();
        assert_eq!(key.month_index(), 2);
        assert!(MonthKey::from_calendar_month(2024, 0).is_err());
        assert!(MonthKey::from_calendar_month(2024, 13).is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = MonthKey::new(2023, 11).unwrap();
        let b = MonthKey::new(2024, 1).unwrap();
        let c = MonthKey::new(2024, 10).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2024, 2).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-2\"");
        let back: MonthKey = serde_json::from_str("\"2024-2\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"2024-99\"").is_err());
    }

    #[test]
    fn test_last_day_of_month_stays_in_month() {
        let parsed = parse_entry_date("2024-03-31").unwrap();
        assert_eq!(parsed, date(2024, 3, 31));
        assert_eq!(MonthKey::from_date(parsed).to_string(), "2024-2");
    }

    #[test]
    fn test_local_timestamp_keeps_local_date() {
        let late = Local
            .with_ymd_and_hms(2024, 1, 31, 23, 30, 0)
            .earliest()
            .unwrap();
        let parsed = parse_entry_date(&late.to_rfc3339()).unwrap();
        assert_eq!(parsed, date(2024, 1, 31));
        assert_eq!(MonthKey::from_date(parsed).month_index(), 0);

        let picker = parse_entry_date("2024-01-31T23:30").unwrap();
        assert_eq!(picker, date(2024, 1, 31));
    }

    #[test]
    fn test_parse_entry_date_errors() {
        assert_eq!(parse_entry_date("  "), Err(DateParseError::Missing));
        assert!(matches!(
            parse_entry_date("2024-02-30"),
            Err(DateParseError::Invalid(_))
        ));
        assert!(parse_entry_date("yesterday").is_err());
    }
}
