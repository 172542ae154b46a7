//! SubmitFeedbackHandler - Student rates a session.

use std::sync::Arc;

use crate::domain::booking::{Feedback, Rating};
use crate::domain::foundation::{BookingId, MarketplaceError, UserId};
use crate::ports::{BookingRepository, FeedbackRepository, InsertOutcome};

#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub booking_id: BookingId,
    pub submitter: UserId,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Duplicate submissions are benign and reported, not failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFeedbackResult {
    Submitted(Feedback),
    AlreadySubmitted,
}

pub struct SubmitFeedbackHandler {
    bookings: Arc<dyn BookingRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl SubmitFeedbackHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { bookings, feedback }
    }

    pub async fn handle(&self, cmd: SubmitFeedbackCommand) -> Result<SubmitFeedbackResult, MarketplaceError> {
        let rating = Rating::new(cmd.rating)?;

        let booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("Booking", cmd.booking_id))?;

        if booking.student_id != cmd.submitter {
            return Err(MarketplaceError::forbidden("only the booking's student can leave feedback"));
        }
        if !booking.status.accepts_feedback() {
            return Err(MarketplaceError::invalid_state(booking.status, "leave feedback"));
        }

        if booking.feedback_submitted || self.feedback.find_by_booking(&booking.id).await?.is_some() {
            return Ok(SubmitFeedbackResult::AlreadySubmitted);
        }

        let feedback = Feedback::new(
            booking.id,
            booking.student_id.clone(),
            booking.tutor_id.clone(),
            booking.subject.clone(),
            rating,
            cmd.comment,
        )?;

        // The pre-check can race; the unique key on the booking settles it.
        if self.feedback.insert(&feedback).await? == InsertOutcome::Duplicate {
            tracing::info!(booking_id = %booking.id, "Concurrent feedback submission detected");
            return Ok(SubmitFeedbackResult::AlreadySubmitted);
        }

        self.bookings.mark_feedback_submitted(&booking.id).await?;
        tracing::info!(booking_id = %booking.id, rating = rating.value(), "Feedback submitted");

        Ok(SubmitFeedbackResult::Submitted(feedback))
    }
}
