//! Booking lifecycle state machine.
//!
//! ```text
//! pending_payment ──► scheduled ──► completed
//!        │              ▲   │
//!        │              │   ▼
//!        │          reschedule_requested
//!        ▼              │
//!    cancelled ◄────────┘ (from any non-terminal state)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created by checkout; waiting for the payment provider.
    PendingPayment,

    /// Paid and confirmed. The session will take place.
    Scheduled,

    /// Session took place. Set by an out-of-band reconciliation job.
    Completed,

    /// Cancelled. Reserved for administrative use.
    Cancelled,

    /// A participant asked to move the session; resolution happens off-system.
    RescheduleRequested,
}

impl BookingStatus {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Scheduled => "scheduled",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::RescheduleRequested => "reschedule_requested",
        }
    }

    /// Statuses shown on a participant's class list.
    pub fn is_visible_to_participants(&self) -> bool {
        matches!(
            self,
            BookingStatus::Scheduled | BookingStatus::Completed | BookingStatus::RescheduleRequested
        )
    }

    /// Statuses in which the student can leave feedback.
    pub fn accepts_feedback(&self) -> bool {
        matches!(self, BookingStatus::Scheduled | BookingStatus::Completed)
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (PendingPayment, Scheduled)
                | (PendingPayment, Cancelled)
                | (Scheduled, Completed)
                | (Scheduled, RescheduleRequested)
                | (Scheduled, Cancelled)
                | (RescheduleRequested, Scheduled)
                | (RescheduleRequested, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            PendingPayment => vec![Scheduled, Cancelled],
            Scheduled => vec![Completed, RescheduleRequested, Cancelled],
            RescheduleRequested => vec![Scheduled, Cancelled],
            Completed => vec![],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(BookingStatus::PendingPayment),
            "scheduled" => Ok(BookingStatus::Scheduled),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "reschedule_requested" => Ok(BookingStatus::RescheduleRequested),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown booking status '{}'", other),
            )),
        }
    }
}
