//! Shared application state for all routes.

use std::sync::Arc;

use crate::application::handlers::booking::{
    CheckoutSettings, CreateCheckoutHandler, FulfillBookingHandler, FulfillmentSettings,
    HandlePaymentWebhookHandler, ListMyClassesHandler, RequestRescheduleHandler, SubmitFeedbackHandler,
};
use crate::application::handlers::contact::{ListInquiriesHandler, SubmitInquiryHandler};
use crate::application::handlers::messaging::{GetConversationHandler, GetUnreadCountHandler, SendMessageHandler};
use crate::application::handlers::tutor::{
    GetAvailabilityHandler, GetTutorProfileHandler, ReviewTutorApplicationHandler, SaveTutorProfileHandler,
    UpdateAvailabilityHandler,
};
use crate::ports::{
    AvailabilityStore, BookingRepository, Clock, FeedbackRepository, InquiryRepository, MeetingProvider, MessageRepository, Notifier,
    PaymentProvider, TutorProfileRepository, UserDirectory,
};

/// Ports and settings shared by every request.
///
/// Cloned per request; handlers are built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub profiles: Arc<dyn TutorProfileRepository>,
    pub availability: Arc<dyn AvailabilityStore>,
    pub users: Arc<dyn UserDirectory>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub meeting_provider: Arc<dyn MeetingProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub checkout: CheckoutSettings,
    pub fulfillment: FulfillmentSettings,
}

impl AppState {
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.bookings.clone(),
            self.profiles.clone(),
            self.availability.clone(),
            self.users.clone(),
            self.payment_provider.clone(),
            self.checkout.clone(),
        )
    }

    pub fn fulfillment_handler(&self) -> FulfillBookingHandler {
        FulfillBookingHandler::new(
            self.bookings.clone(),
            self.availability.clone(),
            self.users.clone(),
            self.meeting_provider.clone(),
            self.notifier.clone(),
            self.clock.clone(),
            self.fulfillment,
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.payment_provider.clone(), Arc::new(self.fulfillment_handler()))
    }

    pub fn list_my_classes_handler(&self) -> ListMyClassesHandler {
        ListMyClassesHandler::new(self.bookings.clone(), self.clock.clone())
    }

    pub fn reschedule_handler(&self) -> RequestRescheduleHandler {
        RequestRescheduleHandler::new(self.bookings.clone(), self.users.clone(), self.notifier.clone())
    }

    pub fn feedback_handler(&self) -> SubmitFeedbackHandler {
        SubmitFeedbackHandler::new(self.bookings.clone(), self.feedback.clone())
    }

    pub fn tutor_profile_handler(&self) -> GetTutorProfileHandler {
        GetTutorProfileHandler::new(self.profiles.clone(), self.users.clone())
    }

    pub fn availability_query_handler(&self) -> GetAvailabilityHandler {
        GetAvailabilityHandler::new(self.availability.clone())
    }

    pub fn save_profile_handler(&self) -> SaveTutorProfileHandler {
        SaveTutorProfileHandler::new(
            self.profiles.clone(),
            self.availability.clone(),
            self.users.clone(),
            self.notifier.clone(),
        )
    }

    pub fn update_availability_handler(&self) -> UpdateAvailabilityHandler {
        UpdateAvailabilityHandler::new(self.availability.clone(), self.users.clone())
    }

    pub fn review_handler(&self) -> ReviewTutorApplicationHandler {
        ReviewTutorApplicationHandler::new(self.users.clone(), self.notifier.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.messages.clone(), self.users.clone(), self.notifier.clone())
    }

    pub fn conversation_handler(&self) -> GetConversationHandler {
        GetConversationHandler::new(self.messages.clone())
    }

    pub fn unread_count_handler(&self) -> GetUnreadCountHandler {
        GetUnreadCountHandler::new(self.messages.clone())
    }

    pub fn submit_inquiry_handler(&self) -> SubmitInquiryHandler {
        SubmitInquiryHandler::new(self.inquiries.clone(), self.notifier.clone(), self.clock.clone())
    }

    pub fn list_inquiries_handler(&self) -> ListInquiriesHandler {
        ListInquiriesHandler::new(self.inquiries.clone(), self.users.clone())
    }
}
