use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DayWindow, TimeOfDay};
use crate::domain::foundation::{Timestamp, ValidationError};

/// A tutor-declared bookable interval on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilitySlot {
    /// Creates a slot, rejecting intervals that do not move forward in time.
    pub fn new(
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        if end_time <= start_time {
            return Err(ValidationError::invalid_format(
                "endTime",
                format!("{} must be after start time {}", end_time, start_time),
            ));
        }
        Ok(Self {
            date,
            start_time,
            end_time,
        })
    }

    /// Parses the raw `{date, startTime, endTime}` triple from an edit form.
    pub fn parse(date: NaiveDate, start_time: &str, end_time: &str) -> Result<Self, ValidationError> {
        Self::new(
            date,
            TimeOfDay::parse("startTime", start_time)?,
            TimeOfDay::parse("endTime", end_time)?,
        )
    }

    /// Absolute midnight UTC of the slot's day, the stored form of `date`.
    pub fn day_start(&self) -> Timestamp {
        Timestamp::start_of(self.date)
    }

    /// True if this slot is the one a booking in `window` at `start_time` consumes.
    pub fn matches(&self, window: &DayWindow, start_time: &TimeOfDay) -> bool {
        self.start_time == *start_time && window.contains(&self.day_start())
    }

    /// Identity within one tutor's list: the (date, startTime) pair.
    pub fn same_opening(&self, other: &AvailabilitySlot) -> bool {
        self.date == other.date && self.start_time == other.start_time
    }
}
