//! In-memory feedback store, unique per booking.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::Feedback;
use crate::domain::foundation::{BookingId, DomainError};
use crate::ports::{FeedbackRepository, InsertOutcome};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackRepository {
    by_booking: Arc<RwLock<HashMap<BookingId, Feedback>>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.by_booking.read().await.len()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn insert(&self, feedback: &Feedback) -> Result<InsertOutcome, DomainError> {
        let mut by_booking = self.by_booking.write().await;
        if by_booking.contains_key(&feedback.booking_id) {
            return Ok(InsertOutcome::Duplicate);
        }
        by_booking.insert(feedback.booking_id, feedback.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn find_by_booking(&self, booking: &BookingId) -> Result<Option<Feedback>, DomainError> {
        Ok(self.by_booking.read().await.get(booking).cloned())
    }
}
