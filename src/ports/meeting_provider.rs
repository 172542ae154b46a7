//! Meeting provider port for video-conference provisioning.
//!
//! Meeting creation is best-effort from the booking's point of view: a
//! failure leaves the booking confirmed without a meeting link.

use async_trait::async_trait;
use std::fmt;

use crate::domain::booking::{Booking, MeetingDetails};
use crate::domain::foundation::{BookingId, Timestamp};
use crate::domain::tutor::UserAccount;

/// Provisions a video meeting for a confirmed booking.
#[async_trait]
pub trait MeetingProvider: Send + Sync {
    /// Create a scheduled meeting and return join/host credentials.
    async fn create_meeting(&self, request: &MeetingRequest) -> Result<MeetingDetails, MeetingError>;
}

/// What the provider needs to schedule one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub booking_id: BookingId,
    pub topic: String,
    /// Absolute start instant, sent to the provider in UTC.
    pub start_time: Timestamp,
    pub duration_minutes: u32,
    /// Tutor hosting the meeting.
    pub host_email: String,
}

impl MeetingRequest {
    /// Builds the request for a booking hosted by its tutor.
    pub fn for_booking(booking: &Booking, host: &UserAccount, duration_minutes: u32) -> Self {
        Self {
            booking_id: booking.id,
            topic: format!("Tutoring Session: {}", booking.subject),
            start_time: booking.session_date,
            duration_minutes,
            host_email: host.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingErrorKind {
    /// Credential exchange was rejected.
    Authentication,
    /// Transport failure.
    Network,
    /// No answer within the bounded timeout.
    Timeout,
    /// Provider answered with an error status.
    Provider,
    /// Provider answered with something we could not parse.
    InvalidResponse,
}

/// Meeting provisioning failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingError {
    pub kind: MeetingErrorKind,
    pub message: String,
}

impl MeetingError {
    pub fn new(kind: MeetingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(after_secs: u64) -> Self {
        Self::new(
            MeetingErrorKind::Timeout,
            format!("meeting provider did not answer within {}s", after_secs),
        )
    }
}

impl fmt::Display for MeetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for MeetingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn request_uses_subject_and_booking_instant() {
        let booking = Booking::create_pending(
            BookingId::new(),
            UserId::new("student-1").unwrap(),
            UserId::new("tutor-1").unwrap(),
            "Chemistry",
            Timestamp::parse_rfc3339("t", "2025-03-10T14:00:00Z").unwrap(),
        )
        .unwrap();
        let tutor = UserAccount::approved_tutor(UserId::new("tutor-1").unwrap(), "Tess", "tess@example.com");

        let request = MeetingRequest::for_booking(&booking, &tutor, 60);
        assert_eq!(request.topic, "Tutoring Session: Chemistry");
        assert_eq!(request.start_time, booking.session_date);
        assert_eq!(request.host_email, "tess@example.com");
    }

    #[test]
    fn timeout_error_names_the_bound() {
        let err = MeetingError::timeout(10);
        assert_eq!(err.kind, MeetingErrorKind::Timeout);
        assert!(err.to_string().contains("10s"));
    }
}
