//! Wall-clock time of day in 24-hour `HH:MM` form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Time of day accepted by availability editing and checkout.
///
/// Parsing accepts `H:MM` and `HH:MM` (hours 0-23, minutes 00-59); the value
/// is always rendered zero-padded so that `9:00` and `09:00` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parses a time of day, naming `field` in the error.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let invalid = || {
            ValidationError::invalid_format(
                field,
                format!("'{}' is not a 24-hour HH:MM time", value),
            )
        };

        let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        if !all_digits(hours) || !all_digits(minutes) {
            return Err(invalid());
        }

        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }

    /// Builds a time from components, `None` if out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("time", s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse("time", &value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_padded_and_unpadded_hours() {
        assert_eq!(TimeOfDay::parse("startTime", "14:00").unwrap().to_string(), "14:00");
        assert_eq!(TimeOfDay::parse("startTime", "9:05").unwrap().to_string(), "09:05");
        assert_eq!(TimeOfDay::parse("startTime", "00:00").unwrap().to_string(), "00:00");
        assert_eq!(TimeOfDay::parse("startTime", "23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn rejects_malformed_values() {
        for bad in ["24:00", "12:60", "1200", "12:5", "12:005", "-1:00", " 12:00", "ab:cd", "", ":30", "123:00"] {
            let err = TimeOfDay::parse("startTime", bad).unwrap_err();
            assert_eq!(err.field(), "startTime", "input {:?}", bad);
        }
    }

    #[test]
    fn unpadded_and_padded_forms_are_equal() {
        assert_eq!(
            TimeOfDay::parse("t", "9:00").unwrap(),
            TimeOfDay::parse("t", "09:00").unwrap()
        );
    }

    #[test]
    fn orders_by_clock_time() {
        let early = TimeOfDay::parse("t", "9:30").unwrap();
        let late = TimeOfDay::parse("t", "14:00").unwrap();
        assert!(early < late);
        assert_eq!(late.minutes_since_midnight(), 840);
    }

    #[test]
    fn deserializes_from_json_string() {
        let t: TimeOfDay = serde_json::from_str("\"14:00\"").unwrap();
        assert_eq!(t, TimeOfDay::from_hm(14, 0).unwrap());
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    proptest! {
        #[test]
        fn every_valid_clock_time_parses(hour in 0u8..24, minute in 0u8..60) {
            let padded = format!("{:02}:{:02}", hour, minute);
            let unpadded = format!("{}:{:02}", hour, minute);
            let expected = TimeOfDay::from_hm(hour, minute).unwrap();
            prop_assert_eq!(TimeOfDay::parse("t", &padded).unwrap(), expected);
            prop_assert_eq!(TimeOfDay::parse("t", &unpadded).unwrap(), expected);
        }

        #[test]
        fn out_of_range_hours_are_rejected(hour in 24u8..100, minute in 0u8..60) {
            let value = format!("{}:{:02}", hour, minute);
            prop_assert!(TimeOfDay::parse("t", &value).is_err());
        }
    }
}
