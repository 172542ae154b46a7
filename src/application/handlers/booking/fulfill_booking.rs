//! FulfillBookingHandler - Turns a paid checkout into a scheduled session.
//!
//! Runs once per verified payment-completion event. Webhooks arrive at least
//! once, out of order and sometimes concurrently, so every step tolerates
//! having already happened:
//!
//! 1. Resolve the booking and both participants; nothing is written before
//!    both identities are known.
//! 2. Take the fulfillment claim (a lease on the stored booking). A delivery
//!    that loses the claim backs off and lets the provider redeliver.
//! 3. Remove the matching availability slot, at most once.
//! 4. Provision the meeting under a bounded timeout unless the booking
//!    already carries one, and record it immediately.
//! 5. Commit `pending_payment -> scheduled` as a compare-and-swap.
//! 6. Notify both participants.
//!
//! Failures in steps 3, 4 and 6 are logged and do not undo earlier steps.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::availability::{DayWindow, TimeOfDay};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, MarketplaceError};
use crate::domain::tutor::UserAccount;
use crate::ports::{
    AvailabilityStore, BookingRepository, Clock, Contact, MeetingError, MeetingProvider, MeetingRequest,
    Notification, Notifier, UserDirectory,
};

/// Tunables for fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FulfillmentSettings {
    /// How long a claim blocks concurrent deliveries.
    pub lease_secs: i64,
    /// Upper bound on one meeting-creation call.
    pub meeting_timeout: Duration,
    /// Length of a booked session.
    pub session_minutes: u32,
}

impl Default for FulfillmentSettings {
    fn default() -> Self {
        Self {
            lease_secs: 120,
            meeting_timeout: Duration::from_secs(10),
            session_minutes: 60,
        }
    }
}

/// Correlation data taken from a payment-completion event.
#[derive(Debug, Clone, Default)]
pub struct FulfillBookingCommand {
    /// Booking id from the checkout metadata, when present and well-formed.
    pub booking_id: Option<BookingId>,
    /// Provider session id, used when the metadata carries no booking id.
    pub payment_session_id: Option<String>,
    /// `HH:MM` start time from the checkout metadata.
    pub start_time: Option<String>,
}

/// What a delivery achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    /// This delivery scheduled the booking.
    Fulfilled {
        booking_id: BookingId,
        slot_removed: bool,
        meeting_attached: bool,
        notified: bool,
    },
    /// The booking was already scheduled; nothing was done.
    AlreadyProcessed { booking_id: BookingId },
    /// Another delivery holds a live claim on the booking.
    InProgress { booking_id: BookingId },
    /// No booking matches the event.
    BookingNotFound,
    /// Student or tutor account is missing; nothing was written.
    MissingParticipant { booking_id: BookingId },
    /// The booking is in a state payment cannot confirm.
    NotPayable {
        booking_id: BookingId,
        status: BookingStatus,
    },
}

impl FulfillmentOutcome {
    /// True when the provider should deliver the event again later.
    pub fn requires_redelivery(&self) -> bool {
        matches!(self, FulfillmentOutcome::InProgress { .. })
    }
}

/// Fulfillment orchestrator.
pub struct FulfillBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    availability: Arc<dyn AvailabilityStore>,
    users: Arc<dyn UserDirectory>,
    meetings: Arc<dyn MeetingProvider>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    settings: FulfillmentSettings,
}

impl FulfillBookingHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        availability: Arc<dyn AvailabilityStore>,
        users: Arc<dyn UserDirectory>,
        meetings: Arc<dyn MeetingProvider>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        settings: FulfillmentSettings,
    ) -> Self {
        Self {
            bookings,
            availability,
            users,
            meetings,
            notifier,
            clock,
            settings,
        }
    }

    pub async fn handle(&self, cmd: FulfillBookingCommand) -> Result<FulfillmentOutcome, MarketplaceError> {
        // 1. Locate the booking
        let booking = match self.locate(&cmd).await? {
            Some(booking) => booking,
            None => {
                tracing::error!(
                    booking_id = ?cmd.booking_id,
                    payment_session_id = ?cmd.payment_session_id,
                    "Payment completed for unknown booking"
                );
                return Ok(FulfillmentOutcome::BookingNotFound);
            }
        };
        let booking_id = booking.id;

        // 2. Idempotency
        match booking.status {
            BookingStatus::PendingPayment => {}
            BookingStatus::Scheduled => {
                tracing::info!(booking_id = %booking_id, "Booking already scheduled, ignoring redelivery");
                return Ok(FulfillmentOutcome::AlreadyProcessed { booking_id });
            }
            status => {
                tracing::warn!(booking_id = %booking_id, status = %status, "Payment completed for booking that is not payable");
                return Ok(FulfillmentOutcome::NotPayable { booking_id, status });
            }
        }

        // 3. Participants, before anything is written
        let (student, tutor) = futures::try_join!(
            self.users.find_by_id(&booking.student_id),
            self.users.find_by_id(&booking.tutor_id),
        )?;
        let (student, tutor) = match (student, tutor) {
            (Some(student), Some(tutor)) => (student, tutor),
            (student, tutor) => {
                tracing::error!(
                    severity = "critical",
                    booking_id = %booking_id,
                    student_found = student.is_some(),
                    tutor_found = tutor.is_some(),
                    "Paid booking references a missing participant; manual remediation required"
                );
                return Ok(FulfillmentOutcome::MissingParticipant { booking_id });
            }
        };

        // 4. Claim
        let now = self.clock.now();
        let claimed = self
            .bookings
            .claim_fulfillment(&booking_id, now, now.plus_secs(self.settings.lease_secs))
            .await?;
        if !claimed {
            return self.lost_claim(booking_id).await;
        }

        // Re-read under the claim; an earlier partial run may have recorded a meeting.
        let mut booking = self
            .bookings
            .find_by_id(&booking_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("Booking", booking_id))?;

        // 5. Availability
        let slot_removed = self.remove_slot(&booking, cmd.start_time.as_deref()).await;

        // 6. Meeting
        let meeting_attached = self.provision_meeting(&mut booking, &tutor).await;

        // 7. Commit
        booking.confirm()?;
        let committed = self
            .bookings
            .update_if_status(&booking, BookingStatus::PendingPayment)
            .await?;
        if !committed {
            tracing::info!(booking_id = %booking_id, "Booking was scheduled by a concurrent delivery");
            return Ok(FulfillmentOutcome::AlreadyProcessed { booking_id });
        }
        tracing::info!(
            booking_id = %booking_id,
            slot_removed,
            meeting_attached,
            "Booking scheduled"
        );

        // 8. Notify
        let notified = self.notify(&booking, &student, &tutor).await;

        Ok(FulfillmentOutcome::Fulfilled {
            booking_id,
            slot_removed,
            meeting_attached,
            notified,
        })
    }

    async fn locate(&self, cmd: &FulfillBookingCommand) -> Result<Option<Booking>, MarketplaceError> {
        if let Some(id) = &cmd.booking_id {
            if let Some(booking) = self.bookings.find_by_id(id).await? {
                return Ok(Some(booking));
            }
        }
        match cmd.payment_session_id.as_deref() {
            Some(session_id) => Ok(self.bookings.find_by_payment_session(session_id).await?),
            None => Ok(None),
        }
    }

    async fn lost_claim(&self, booking_id: BookingId) -> Result<FulfillmentOutcome, MarketplaceError> {
        let current = self.bookings.find_by_id(&booking_id).await?;
        match current.map(|b| b.status) {
            Some(BookingStatus::PendingPayment) => {
                tracing::info!(booking_id = %booking_id, "Fulfillment claimed by another delivery");
                Ok(FulfillmentOutcome::InProgress { booking_id })
            }
            Some(BookingStatus::Scheduled) => Ok(FulfillmentOutcome::AlreadyProcessed { booking_id }),
            Some(status) => Ok(FulfillmentOutcome::NotPayable { booking_id, status }),
            None => Ok(FulfillmentOutcome::BookingNotFound),
        }
    }

    async fn remove_slot(&self, booking: &Booking, start_time: Option<&str>) -> bool {
        let Some(raw) = start_time else {
            tracing::warn!(booking_id = %booking.id, "No startTime in payment metadata, skipping slot removal");
            return false;
        };
        let start_time = match TimeOfDay::parse("startTime", raw) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(booking_id = %booking.id, error = %err, "Unparseable startTime, skipping slot removal");
                return false;
            }
        };

        let window = DayWindow::containing(&booking.session_date);
        match self
            .availability
            .remove_slot(&booking.tutor_id, &window, &start_time)
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(
                    booking_id = %booking.id,
                    tutor_id = %booking.tutor_id,
                    date = %window.date(),
                    start_time = %start_time,
                    "No matching availability slot; it may have been removed already"
                );
                false
            }
            Err(err) => {
                tracing::error!(booking_id = %booking.id, error = %err, "Failed to remove availability slot");
                false
            }
        }
    }

    /// Returns whether the booking carries a meeting afterwards.
    async fn provision_meeting(&self, booking: &mut Booking, tutor: &UserAccount) -> bool {
        if booking.meeting.is_some() {
            tracing::info!(booking_id = %booking.id, "Meeting already provisioned");
            return true;
        }

        let request = MeetingRequest::for_booking(booking, tutor, self.settings.session_minutes);
        let created = match tokio::time::timeout(self.settings.meeting_timeout, self.meetings.create_meeting(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(MeetingError::timeout(self.settings.meeting_timeout.as_secs())),
        };
        let meeting = match created {
            Ok(meeting) => meeting,
            Err(err) => {
                tracing::error!(
                    booking_id = %booking.id,
                    error = %err,
                    "Meeting provisioning failed; booking will be scheduled without a link"
                );
                return false;
            }
        };

        match self.bookings.record_meeting(&booking.id, &meeting).await {
            Ok(true) => booking.attach_meeting(meeting),
            Ok(false) => {
                // Someone recorded first; keep theirs.
                match self.bookings.find_by_id(&booking.id).await {
                    Ok(Some(stored)) => {
                        booking.meeting = stored.meeting;
                        booking.meeting.is_some()
                    }
                    Ok(None) => false,
                    Err(err) => {
                        tracing::error!(booking_id = %booking.id, error = %err, "Failed to reload recorded meeting");
                        false
                    }
                }
            }
            Err(err) => {
                tracing::error!(booking_id = %booking.id, error = %err, "Failed to record meeting details");
                booking.attach_meeting(meeting)
            }
        }
    }

    async fn notify(&self, booking: &Booking, student: &UserAccount, tutor: &UserAccount) -> bool {
        let notification = Notification::BookingConfirmed {
            booking: booking.clone(),
            student: Contact::from(student),
            tutor: Contact::from(tutor),
        };
        match self.notifier.notify(notification).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(booking_id = %booking.id, error = %err, "Failed to send booking confirmation");
                false
            }
        }
    }
}
