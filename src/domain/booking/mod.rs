//! Booking module - the lifecycle of a paid tutoring session.
//!
//! # Components
//!
//! - `status` - Lifecycle state machine
//! - `aggregate` - Booking aggregate, participant roles, meeting details
//! - `pricing` - Hourly rate to minor-unit charge
//! - `feedback` - Student feedback and rating

mod aggregate;
mod feedback;
mod pricing;
mod status;

pub use aggregate::{Booking, MeetingDetails, ParticipantRole, RescheduleReason};
pub use feedback::{Feedback, Rating};
pub use pricing::{charge_minor_units, MinorUnits};
pub use status::BookingStatus;
