//! Feedback persistence port.

use async_trait::async_trait;

use crate::domain::booking::Feedback;
use crate::domain::foundation::{BookingId, DomainError};

/// Result of inserting a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record for the same booking already exists (unique key on booking).
    Duplicate,
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Inserts a record; a uniqueness violation on the booking is reported as
    /// [`InsertOutcome::Duplicate`], not as an error.
    async fn insert(&self, feedback: &Feedback) -> Result<InsertOutcome, DomainError>;

    async fn find_by_booking(&self, booking: &BookingId) -> Result<Option<Feedback>, DomainError>;
}
