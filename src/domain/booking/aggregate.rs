//! Booking aggregate entity.
//!
//! A Booking is the financial and scheduling record of one tutoring session.
//!
//! # Invariants
//!
//! - Created only in `pending_payment`
//! - Status changes go through [`BookingStatus`]'s transition table
//! - `reschedule_requester_role` is set only while `reschedule_requested`
//! - `meeting` is written at most once and never cleared
//! - Never physically deleted

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ensure_length, BookingId, MarketplaceError, StateMachine, Timestamp, TransitionError, UserId,
    ValidationError,
};

use super::BookingStatus;

/// Which side of a booking a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Student,
    Tutor,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Student => "student",
            ParticipantRole::Tutor => "tutor",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            ParticipantRole::Student => ParticipantRole::Tutor,
            ParticipantRole::Tutor => ParticipantRole::Student,
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(ParticipantRole::Student),
            "tutor" => Ok(ParticipantRole::Tutor),
            other => Err(ValidationError::invalid_format(
                "rescheduleRequesterRole",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Video-conference credentials attached when a booking is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    /// Link participants use to join.
    pub join_url: String,
    /// Link the host uses to start the meeting.
    pub host_url: String,
    /// Provider's meeting identifier.
    pub meeting_id: String,
    pub passcode: Option<String>,
}

/// Validated reason attached to a reschedule request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleReason(String);

impl RescheduleReason {
    pub const MIN_CHARS: usize = 10;
    pub const MAX_CHARS: usize = 500;

    pub fn new(reason: impl Into<String>) -> Result<Self, ValidationError> {
        let reason = reason.into();
        ensure_length("reason", &reason, Self::MIN_CHARS, Self::MAX_CHARS)?;
        Ok(Self(reason.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Booking aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub student_id: UserId,
    pub tutor_id: UserId,
    pub subject: String,
    /// Absolute UTC instant the session starts.
    pub session_date: Timestamp,
    pub status: BookingStatus,
    pub reschedule_requester_role: Option<ParticipantRole>,
    /// Payment provider's checkout session id.
    pub payment_session_id: Option<String>,
    pub feedback_submitted: bool,
    pub meeting: Option<MeetingDetails>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Creates a booking awaiting payment.
    pub fn create_pending(
        id: BookingId,
        student_id: UserId,
        tutor_id: UserId,
        subject: impl Into<String>,
        session_date: Timestamp,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        ensure_length("subject", &subject, 1, 200)?;
        if student_id == tutor_id {
            return Err(ValidationError::invalid_format(
                "tutorId",
                "a tutor cannot book a session with themselves",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            student_id,
            tutor_id,
            subject: subject.trim().to_string(),
            session_date,
            status: BookingStatus::PendingPayment,
            reschedule_requester_role: None,
            payment_session_id: None,
            feedback_submitted: false,
            meeting: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Records the checkout session so a webhook can be correlated back.
    pub fn attach_payment_session(&mut self, session_id: impl Into<String>) {
        self.payment_session_id = Some(session_id.into());
        self.touch();
    }

    /// Role of `user` on this booking, if any.
    pub fn role_of(&self, user: &UserId) -> Option<ParticipantRole> {
        if *user == self.student_id {
            Some(ParticipantRole::Student)
        } else if *user == self.tutor_id {
            Some(ParticipantRole::Tutor)
        } else {
            None
        }
    }

    /// The participant holding `role`.
    pub fn participant(&self, role: ParticipantRole) -> &UserId {
        match role {
            ParticipantRole::Student => &self.student_id,
            ParticipantRole::Tutor => &self.tutor_id,
        }
    }

    /// Attaches meeting credentials unless some are already present.
    ///
    /// Returns false if the booking already carries a meeting.
    pub fn attach_meeting(&mut self, meeting: MeetingDetails) -> bool {
        if self.meeting.is_some() {
            return false;
        }
        self.meeting = Some(meeting);
        self.touch();
        true
    }

    /// Marks the booking paid and confirmed.
    pub fn confirm(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(BookingStatus::Scheduled)?;
        self.reschedule_requester_role = None;
        self.touch();
        Ok(())
    }

    /// Records a reschedule request by one of the participants.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `requester` is neither student nor tutor
    /// - `InvalidState` unless the booking is `scheduled`
    pub fn request_reschedule(&mut self, requester: &UserId) -> Result<ParticipantRole, MarketplaceError> {
        let role = self
            .role_of(requester)
            .ok_or_else(|| MarketplaceError::forbidden("only the booking's student or tutor can request a reschedule"))?;

        if self.status != BookingStatus::Scheduled {
            return Err(MarketplaceError::invalid_state(self.status, "request a reschedule"));
        }
        self.status = self.status.transition_to(BookingStatus::RescheduleRequested)?;
        self.reschedule_requester_role = Some(role);
        self.touch();
        Ok(role)
    }

    pub fn mark_feedback_submitted(&mut self) {
        self.feedback_submitted = true;
        self.touch();
    }

    pub fn complete(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(BookingStatus::Completed)?;
        self.touch();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.transition_to(BookingStatus::Cancelled)?;
        self.reschedule_requester_role = None;
        self.touch();
        Ok(())
    }

    /// Whether the class list files this booking under "past".
    pub fn is_past(&self, now: &Timestamp) -> bool {
        match self.status {
            BookingStatus::Completed => true,
            BookingStatus::Scheduled => self.session_date.is_before(now),
            _ => false,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
