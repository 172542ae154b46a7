//! Availability module - what a tutor can still be booked for.
//!
//! A slot is consumed exactly once, when a booking for the same calendar day
//! and start time is fulfilled.

mod day_window;
mod schedule;
mod slot;
mod time_of_day;

pub use day_window::DayWindow;
pub use schedule::AvailabilitySchedule;
pub use slot::AvailabilitySlot;
pub use time_of_day::TimeOfDay;
