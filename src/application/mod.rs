//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::booking::{
    CheckoutSettings, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult, FulfillBookingCommand,
    FulfillBookingHandler, FulfillmentOutcome, FulfillmentSettings, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler, HandlePaymentWebhookResult, ListMyClassesHandler, ListMyClassesQuery, MyClasses,
    RequestRescheduleCommand, RequestRescheduleHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
    SubmitFeedbackResult,
};
pub use handlers::contact::{ListInquiriesHandler, ListInquiriesQuery, SubmitInquiryCommand, SubmitInquiryHandler};
pub use handlers::messaging::{
    GetConversationHandler, GetConversationQuery, GetUnreadCountHandler, SendMessageCommand, SendMessageHandler,
};
pub use handlers::tutor::{
    AvailabilityUpdateMode, GetAvailabilityHandler, GetTutorProfileHandler, GetTutorProfileQuery,
    ReviewTutorApplicationCommand, ReviewTutorApplicationHandler, SaveTutorProfileCommand, SaveTutorProfileHandler,
    SaveTutorProfileResult, SlotInput, TutorProfileView, UpdateAvailabilityCommand, UpdateAvailabilityHandler,
};
