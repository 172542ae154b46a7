//! Booking persistence port.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus, MeetingDetails};
use crate::domain::foundation::{BookingId, DomainError, Timestamp, UserId};

/// Durable store of bookings.
///
/// Status changes go through [`update_if_status`](Self::update_if_status),
/// a compare-and-swap on the stored status, never through a blind overwrite.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a new booking.
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Finds the booking a checkout session was created for.
    async fn find_by_payment_session(&self, session_id: &str) -> Result<Option<Booking>, DomainError>;

    /// All bookings where `user` is student or tutor.
    async fn list_for_participant(&self, user: &UserId) -> Result<Vec<Booking>, DomainError>;

    /// Records the checkout session id on a booking.
    async fn attach_payment_session(&self, id: &BookingId, session_id: &str) -> Result<(), DomainError>;

    async fn mark_feedback_submitted(&self, id: &BookingId) -> Result<(), DomainError>;

    /// Applies the status transition carried by `booking` if the stored
    /// status is still `expected`.
    ///
    /// Writes only `status`, `reschedule_requester_role` and `updated_at`,
    /// plus the meeting if none is stored yet. Other fields keep their stored
    /// values. Returns false when another writer changed the status first. A
    /// successful write also releases any fulfillment claim.
    async fn update_if_status(&self, booking: &Booking, expected: BookingStatus) -> Result<bool, DomainError>;

    /// Takes the fulfillment claim on a `pending_payment` booking.
    ///
    /// Succeeds if no claim exists or the previous one lapsed before `now`.
    /// Returns false if another delivery holds a live claim or the booking is
    /// no longer pending.
    async fn claim_fulfillment(&self, id: &BookingId, now: Timestamp, until: Timestamp) -> Result<bool, DomainError>;

    /// Stores meeting details unless some are already recorded.
    async fn record_meeting(&self, id: &BookingId, meeting: &MeetingDetails) -> Result<bool, DomainError>;
}
