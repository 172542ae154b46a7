//! Notification port.
//!
//! Transactional messages the marketplace emits. Rendering and delivery are
//! the adapter's business; callers log failures and carry on.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::booking::{Booking, ParticipantRole};
use crate::domain::inquiry::Inquiry;
use crate::domain::tutor::{TutorStatus, UserAccount};

/// Addressee of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl From<&UserAccount> for Contact {
    fn from(user: &UserAccount) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Sent to both parties once a booking is scheduled.
    BookingConfirmed {
        booking: Booking,
        student: Contact,
        tutor: Contact,
    },

    /// Sent to the counterparty of a reschedule request.
    RescheduleRequested {
        booking: Booking,
        requested_by: ParticipantRole,
        requester: Contact,
        recipient: Contact,
        reason: String,
    },

    /// Sent to the receiver of a direct message.
    NewMessage {
        recipient: Contact,
        sender_name: String,
        preview: String,
    },

    /// Sent to an applicant after an admin decision.
    TutorStatusChanged {
        tutor: Contact,
        status: TutorStatus,
        reason: Option<String>,
    },

    /// Sent to the applicant and the admin inbox when a profile is submitted.
    TutorApplicationSubmitted { applicant: Contact },

    /// Acknowledges a contact inquiry and forwards it to the admin inbox.
    InquiryReceived { inquiry: Inquiry },
}

impl Notification {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::BookingConfirmed { .. } => "booking_confirmed",
            Notification::RescheduleRequested { .. } => "reschedule_requested",
            Notification::NewMessage { .. } => "new_message",
            Notification::TutorStatusChanged { .. } => "tutor_status_changed",
            Notification::TutorApplicationSubmitted { .. } => "tutor_application_submitted",
            Notification::InquiryReceived { .. } => "inquiry_received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotificationError(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError>;
}
