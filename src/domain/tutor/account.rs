//! User accounts as seen by the marketplace: role, admin flag and the
//! tutor-application review state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ensure_length, MarketplaceError, StateMachine, TransitionError, UserId, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Tutor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Tutor => "tutor",
        }
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "tutor" => Ok(UserRole::Tutor),
            other => Err(ValidationError::invalid_format("role", format!("unknown role '{}'", other))),
        }
    }
}

/// Review state of a tutor application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TutorStatus {
    /// Never applied.
    Unverified,
    /// Profile submitted, waiting for an admin.
    Pending,
    Approved,
    Rejected,
}

impl TutorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TutorStatus::Unverified => "unverified",
            TutorStatus::Pending => "pending",
            TutorStatus::Approved => "approved",
            TutorStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TutorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TutorStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unverified" => Ok(TutorStatus::Unverified),
            "pending" => Ok(TutorStatus::Pending),
            "approved" => Ok(TutorStatus::Approved),
            "rejected" => Ok(TutorStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "tutorStatus",
                format!("unknown tutor status '{}'", other),
            )),
        }
    }
}

impl StateMachine for TutorStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TutorStatus::*;
        match self {
            Unverified => vec![Pending],
            Pending => vec![Approved, Rejected],
            Approved => vec![Pending, Rejected],
            Rejected => vec![Pending, Approved],
        }
    }
}

/// Admin decision on a tutor application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub tutor_status: TutorStatus,
    pub rejection_reason: Option<String>,
    pub is_admin: bool,
}

impl UserAccount {
    pub const MIN_REJECTION_REASON_CHARS: usize = 10;

    /// A plain student account.
    pub fn student(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: UserRole::Student,
            tutor_status: TutorStatus::Unverified,
            rejection_reason: None,
            is_admin: false,
        }
    }

    /// An approved tutor account.
    pub fn approved_tutor(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role: UserRole::Tutor,
            tutor_status: TutorStatus::Approved,
            ..Self::student(id, name, email)
        }
    }

    /// True if this user may publish availability and take bookings.
    pub fn is_approved_tutor(&self) -> bool {
        self.role == UserRole::Tutor && self.tutor_status == TutorStatus::Approved
    }

    /// Puts the application (back) into the review queue.
    pub fn submit_application(&mut self) -> Result<(), TransitionError> {
        if self.tutor_status != TutorStatus::Pending {
            self.tutor_status = self.tutor_status.transition_to(TutorStatus::Pending)?;
        }
        Ok(())
    }

    /// Applies an admin decision.
    ///
    /// Approval grants the tutor role and clears any previous rejection
    /// reason. Rejection demotes to student and records the reason.
    pub fn apply_review(&mut self, decision: &ReviewDecision) -> Result<(), ReviewError> {
        match decision {
            ReviewDecision::Approve => {
                self.tutor_status = self.tutor_status.transition_to(TutorStatus::Approved)?;
                self.role = UserRole::Tutor;
                self.rejection_reason = None;
            }
            ReviewDecision::Reject { reason } => {
                ensure_length("rejectionReason", reason, Self::MIN_REJECTION_REASON_CHARS, 1000)?;
                self.tutor_status = self.tutor_status.transition_to(TutorStatus::Rejected)?;
                self.role = UserRole::Student;
                self.rejection_reason = Some(reason.trim().to_string());
            }
        }
        Ok(())
    }
}

/// Why an admin decision could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl From<ReviewError> for MarketplaceError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Validation(e) => MarketplaceError::Validation(e),
            ReviewError::Transition(e) => e.into(),
        }
    }
}
