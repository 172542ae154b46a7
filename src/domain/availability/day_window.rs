//! UTC calendar-day bounds used to match a booking to an availability slot.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Inclusive window `[00:00:00.000, 23:59:59.999]` of one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    /// Window of the UTC day containing `instant`.
    pub fn containing(instant: &Timestamp) -> Self {
        Self::of_date(instant.date())
    }

    /// Window of a calendar day.
    pub fn of_date(date: NaiveDate) -> Self {
        let start = Timestamp::start_of(date);
        Self {
            start,
            end: start.plus_days(1).plus_millis(-1),
        }
    }

    /// True if `instant` lies inside the window, bounds included.
    pub fn contains(&self, instant: &Timestamp) -> bool {
        !instant.is_before(&self.start) && !instant.is_after(&self.end)
    }

    /// Calendar day the window covers.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339("t", s).unwrap()
    }

    #[test]
    fn window_spans_the_utc_day_of_the_instant() {
        let window = DayWindow::containing(&ts("2025-03-10T14:00:00Z"));
        assert_eq!(window.start.to_rfc3339(), "2025-03-10T00:00:00.000Z");
        assert_eq!(window.end.to_rfc3339(), "2025-03-10T23:59:59.999Z");
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = DayWindow::containing(&ts("2025-03-10T14:00:00Z"));
        assert!(window.contains(&ts("2025-03-10T00:00:00Z")));
        assert!(window.contains(&ts("2025-03-10T23:59:59.999Z")));
        assert!(!window.contains(&ts("2025-03-11T00:00:00Z")));
        assert!(!window.contains(&ts("2025-03-09T23:59:59.999Z")));
    }

    #[test]
    fn late_evening_with_offset_lands_on_next_utc_day() {
        let window = DayWindow::containing(&ts("2025-03-10T22:30:00-05:00"));
        assert_eq!(window.date(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }
}
