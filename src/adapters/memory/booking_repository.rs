//! In-memory booking store with the same compare-and-swap semantics as the
//! Postgres adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingStatus, MeetingDetails};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
struct StoredBooking {
    booking: Booking,
    claimed_until: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<BookingId, StoredBooking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored booking, for assertions.
    pub async fn get(&self, id: &BookingId) -> Option<Booking> {
        self.bookings.read().await.get(id).map(|s| s.booking.clone())
    }

    pub async fn count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

fn not_found(id: &BookingId) -> DomainError {
    DomainError::not_found(ErrorCode::BookingNotFound, id)
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("booking {} already exists", booking.id),
            ));
        }
        bookings.insert(
            booking.id,
            StoredBooking {
                booking: booking.clone(),
                claimed_until: None,
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.get(id).await)
    }

    async fn find_by_payment_session(&self, session_id: &str) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .bookings
            .read()
            .await
            .values()
            .find(|s| s.booking.payment_session_id.as_deref() == Some(session_id))
            .map(|s| s.booking.clone()))
    }

    async fn list_for_participant(&self, user: &UserId) -> Result<Vec<Booking>, DomainError> {
        let mut found: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|s| s.booking.role_of(user).is_some())
            .map(|s| s.booking.clone())
            .collect();
        found.sort_by_key(|b| b.session_date);
        Ok(found)
    }

    async fn attach_payment_session(&self, id: &BookingId, session_id: &str) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get_mut(id).ok_or_else(|| not_found(id))?;
        stored.booking.attach_payment_session(session_id);
        Ok(())
    }

    async fn mark_feedback_submitted(&self, id: &BookingId) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get_mut(id).ok_or_else(|| not_found(id))?;
        stored.booking.mark_feedback_submitted();
        Ok(())
    }

    async fn update_if_status(&self, booking: &Booking, expected: BookingStatus) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get_mut(&booking.id).ok_or_else(|| not_found(&booking.id))?;

        if stored.booking.status != expected {
            return Ok(false);
        }

        let current = &mut stored.booking;
        current.status = booking.status;
        current.reschedule_requester_role = booking.reschedule_requester_role;
        current.updated_at = booking.updated_at;
        if current.meeting.is_none() {
            current.meeting = booking.meeting.clone();
        }
        stored.claimed_until = None;
        Ok(true)
    }

    async fn claim_fulfillment(&self, id: &BookingId, now: Timestamp, until: Timestamp) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get_mut(id).ok_or_else(|| not_found(id))?;

        if stored.booking.status != BookingStatus::PendingPayment {
            return Ok(false);
        }
        if matches!(stored.claimed_until, Some(lease) if lease.is_after(&now)) {
            return Ok(false);
        }

        stored.claimed_until = Some(until);
        Ok(true)
    }

    async fn record_meeting(&self, id: &BookingId, meeting: &MeetingDetails) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().await;
        let stored = bookings.get_mut(id).ok_or_else(|| not_found(id))?;
        Ok(stored.booking.attach_meeting(meeting.clone()))
    }
}
