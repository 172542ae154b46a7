//! RequestRescheduleHandler - A participant asks to move a scheduled session.
//!
//! The actual new time is agreed off-system; this only flags the booking and
//! tells the other side.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingStatus, RescheduleReason};
use crate::domain::foundation::{BookingId, ErrorCode, MarketplaceError, UserId};
use crate::ports::{BookingRepository, Contact, Notification, Notifier, UserDirectory};

#[derive(Debug, Clone)]
pub struct RequestRescheduleCommand {
    pub booking_id: BookingId,
    pub requester: UserId,
    pub reason: String,
}

pub struct RequestRescheduleHandler {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl RequestRescheduleHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            bookings,
            users,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: RequestRescheduleCommand) -> Result<Booking, MarketplaceError> {
        let reason = RescheduleReason::new(cmd.reason)?;

        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("Booking", cmd.booking_id))?;

        let role = booking.request_reschedule(&cmd.requester)?;

        if !self
            .bookings
            .update_if_status(&booking, BookingStatus::Scheduled)
            .await?
        {
            return Err(MarketplaceError::conflict(
                ErrorCode::Conflict,
                "booking changed while the request was being processed",
            ));
        }
        tracing::info!(booking_id = %booking.id, requested_by = %role, "Reschedule requested");

        // Notify the counterparty; failures never undo the request.
        let counterparty = booking.participant(role.other()).clone();
        let (requester, recipient) = futures::try_join!(
            self.users.find_by_id(&cmd.requester),
            self.users.find_by_id(&counterparty),
        )?;
        match (requester, recipient) {
            (Some(requester), Some(recipient)) => {
                let notification = Notification::RescheduleRequested {
                    booking: booking.clone(),
                    requested_by: role,
                    requester: Contact::from(&requester),
                    recipient: Contact::from(&recipient),
                    reason: reason.as_str().to_string(),
                };
                if let Err(err) = self.notifier.notify(notification).await {
                    tracing::warn!(booking_id = %booking.id, error = %err, "Failed to notify reschedule request");
                }
            }
            _ => {
                tracing::warn!(booking_id = %booking.id, "Reschedule participant missing, notification skipped");
            }
        }

        Ok(booking)
    }
}
