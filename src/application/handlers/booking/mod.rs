//! Booking handlers.
//!
//! ## Commands
//! - Creating a hosted checkout for a pending booking
//! - Processing payment webhooks and fulfilling paid bookings
//! - Requesting a reschedule
//! - Submitting session feedback
//!
//! ## Queries
//! - Listing a participant's classes

mod create_checkout;
mod fulfill_booking;
mod handle_payment_webhook;
mod list_my_classes;
mod request_reschedule;
mod submit_feedback;

pub use create_checkout::{CheckoutSettings, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use fulfill_booking::{FulfillBookingCommand, FulfillBookingHandler, FulfillmentOutcome, FulfillmentSettings};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use list_my_classes::{ListMyClassesHandler, ListMyClassesQuery, MyClasses};
pub use request_reschedule::{RequestRescheduleCommand, RequestRescheduleHandler};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler, SubmitFeedbackResult};
