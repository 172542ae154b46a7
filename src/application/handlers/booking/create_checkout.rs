//! CreateCheckoutHandler - Command handler for starting a paid booking.
//!
//! Creates the booking in `pending_payment`, opens a hosted checkout for one
//! session at the tutor's hourly rate and stores the provider's session id
//! on the booking before the URL is handed back, so a webhook racing the
//! redirect can still be correlated.

use std::sync::Arc;

use crate::domain::availability::{DayWindow, TimeOfDay};
use crate::domain::booking::{charge_minor_units, Booking};
use crate::domain::foundation::{
    AuthenticatedUser, BookingId, ErrorCode, MarketplaceError, Timestamp, UserId, ValidationError,
};
use crate::ports::{
    AvailabilityStore, BookingRepository, CheckoutMetadata, CreateCheckoutRequest, PaymentProvider,
    TutorProfileRepository, UserDirectory,
};

/// Where checkout redirects land and what currency is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Public origin of the web app, without a trailing slash.
    pub public_base_url: String,
    /// ISO 4217 code, lowercase.
    pub currency: String,
}

impl CheckoutSettings {
    pub fn new(public_base_url: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            currency: currency.into().to_lowercase(),
        }
    }

    fn success_url(&self, booking_id: &BookingId) -> String {
        format!(
            "{}/my-classes?booking_success=true&booking_id={}",
            self.public_base_url, booking_id
        )
    }

    fn cancel_url(&self, tutor_id: &UserId) -> String {
        format!("{}/tutors/{}?booking_cancelled=true", self.public_base_url, tutor_id)
    }
}

/// Command to book and pay for one session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub student: AuthenticatedUser,
    pub tutor_id: UserId,
    pub subject: String,
    /// RFC 3339 instant the session starts.
    pub session_date: String,
    /// `HH:MM` start time of the chosen slot.
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutResult {
    pub booking_id: BookingId,
    pub session_id: String,
    /// Hosted payment page to redirect the student to.
    pub url: String,
}

pub struct CreateCheckoutHandler {
    bookings: Arc<dyn BookingRepository>,
    profiles: Arc<dyn TutorProfileRepository>,
    availability: Arc<dyn AvailabilityStore>,
    users: Arc<dyn UserDirectory>,
    payment_provider: Arc<dyn PaymentProvider>,
    settings: CheckoutSettings,
}

impl CreateCheckoutHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        profiles: Arc<dyn TutorProfileRepository>,
        availability: Arc<dyn AvailabilityStore>,
        users: Arc<dyn UserDirectory>,
        payment_provider: Arc<dyn PaymentProvider>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            bookings,
            profiles,
            availability,
            users,
            payment_provider,
            settings,
        }
    }

    pub async fn handle(&self, cmd: CreateCheckoutCommand) -> Result<CreateCheckoutResult, MarketplaceError> {
        // 1. Validate input
        if cmd.subject.trim().is_empty() {
            return Err(ValidationError::empty_field("subject").into());
        }
        let start_time = TimeOfDay::parse("startTime", &cmd.start_time)?;
        let session_date = Timestamp::parse_rfc3339("sessionDateTime", &cmd.session_date)?;
        if cmd.student.id == cmd.tutor_id {
            return Err(ValidationError::invalid_format("tutorId", "a tutor cannot book a session with themselves").into());
        }

        // 2. Tutor profile and account
        let profile = self
            .profiles
            .find_by_tutor(&cmd.tutor_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("Tutor profile", &cmd.tutor_id))?;
        let tutor = self
            .users
            .find_by_id(&cmd.tutor_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("Tutor", &cmd.tutor_id))?;

        // 3. Price
        let unit_amount = charge_minor_units(profile.hourly_rate())?;

        // 4. The slot must still be open
        let window = DayWindow::containing(&session_date);
        let slots = self.availability.list_slots(&cmd.tutor_id).await?;
        if !slots.iter().any(|slot| slot.matches(&window, &start_time)) {
            return Err(MarketplaceError::conflict(
                ErrorCode::SlotUnavailable,
                format!("{} at {} is no longer available", window.date(), start_time),
            ));
        }

        // 5. Pending booking
        let booking = Booking::create_pending(
            BookingId::new(),
            cmd.student.id.clone(),
            cmd.tutor_id.clone(),
            cmd.subject.as_str(),
            session_date,
        )?;
        self.bookings.save(&booking).await?;
        tracing::info!(booking_id = %booking.id, tutor_id = %booking.tutor_id, "Booking created with pending payment");

        // 6. Hosted checkout
        let request = CreateCheckoutRequest {
            booking_id: booking.id,
            customer_email: cmd.student.email.clone(),
            product_name: format!("Tutoring Session: {}", booking.subject),
            product_description: format!(
                "1-hour session with {} on {}.",
                tutor.name,
                booking
                    .session_date
                    .as_datetime()
                    .format("%B %-d, %Y at %-I:%M %p UTC")
            ),
            unit_amount,
            currency: self.settings.currency.clone(),
            success_url: self.settings.success_url(&booking.id),
            cancel_url: self.settings.cancel_url(&booking.tutor_id),
            metadata: CheckoutMetadata {
                booking_id: Some(booking.id.to_string()),
                student_id: Some(booking.student_id.to_string()),
                tutor_id: Some(booking.tutor_id.to_string()),
                start_time: Some(start_time.to_string()),
            },
        };
        let session = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(|err| {
                tracing::error!(booking_id = %booking.id, error = %err, "Checkout session creation failed");
                MarketplaceError::upstream("payment provider", err.message, err.retryable)
            })?;

        // 7. Correlate before redirecting
        self.bookings
            .attach_payment_session(&booking.id, &session.id)
            .await?;

        Ok(CreateCheckoutResult {
            booking_id: booking.id,
            session_id: session.id,
            url: session.url,
        })
    }
}
