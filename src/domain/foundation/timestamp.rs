//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 instant, normalizing any offset to UTC.
    pub fn parse_rfc3339(field: &str, value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
    }

    /// Midnight UTC at the start of a calendar day.
    pub fn start_of(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// UTC calendar day this instant falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding seconds. Negative values subtract.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Creates a new timestamp by adding milliseconds. Negative values subtract.
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0 + Duration::milliseconds(millis))
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// ISO 8601 with millisecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_rfc3339_normalizes_offsets_to_utc() {
        let ts = Timestamp::parse_rfc3339("sessionDateTime", "2025-03-10T16:00:00+02:00").unwrap();
        assert_eq!(ts.as_datetime().hour(), 14);
        assert_eq!(ts.to_rfc3339(), "2025-03-10T14:00:00.000Z");
    }

    #[test]
    fn parse_rfc3339_rejects_local_time_without_offset() {
        let err = Timestamp::parse_rfc3339("sessionDateTime", "2025-03-10T14:00:00").unwrap_err();
        assert_eq!(err.field(), "sessionDateTime");
    }

    #[test]
    fn start_of_day_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let ts = Timestamp::start_of(date);
        assert_eq!(ts.to_rfc3339(), "2025-03-10T00:00:00.000Z");
        assert_eq!(ts.date().day(), 10);
    }

    #[test]
    fn arithmetic_helpers_shift_instant() {
        let base = Timestamp::parse_rfc3339("t", "2025-03-10T00:00:00Z").unwrap();
        assert_eq!(base.plus_days(1).date().day(), 11);
        assert_eq!(base.plus_millis(-1).date().day(), 9);
        assert!(base.plus_secs(1).is_after(&base));
        assert!(base.plus_secs(-1).is_before(&base));
    }

    #[test]
    fn timestamp_serializes_as_rfc3339_string() {
        let ts = Timestamp::parse_rfc3339("t", "2025-03-10T14:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with("\"2025-03-10T14:00:00"));
    }
}
