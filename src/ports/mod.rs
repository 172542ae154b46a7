//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `BookingRepository` - Bookings with compare-and-swap status updates
//! - `AvailabilityStore` - Per-tutor bookable slots
//! - `TutorProfileRepository` - Tutor profiles
//! - `FeedbackRepository` - One feedback record per booking
//! - `UserDirectory` - Accounts, roles and tutor review state
//! - `MessageRepository` - Direct messages
//! - `InquiryRepository` - Contact-form inquiries
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - Hosted checkout and signed webhooks
//! - `MeetingProvider` - Video meeting provisioning
//! - `TokenCache` - Short-lived provider credentials
//! - `Notifier` - Transactional notifications
//! - `SessionValidator` - Bearer token validation
//! - `Clock` - Time source

mod availability_store;
mod booking_repository;
mod clock;
mod feedback_repository;
mod inquiry_repository;
mod meeting_provider;
mod message_repository;
mod notifier;
mod payment_provider;
mod session_validator;
mod token_cache;
mod tutor_profile_repository;
mod user_directory;

pub use availability_store::AvailabilityStore;
pub use booking_repository::BookingRepository;
pub use clock::Clock;
pub use feedback_repository::{FeedbackRepository, InsertOutcome};
pub use inquiry_repository::InquiryRepository;
pub use meeting_provider::{MeetingError, MeetingErrorKind, MeetingProvider, MeetingRequest};
pub use message_repository::MessageRepository;
pub use notifier::{Contact, Notification, NotificationError, Notifier};
pub use payment_provider::{
    CheckoutMetadata, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use session_validator::SessionValidator;
pub use token_cache::{CachedToken, TokenCache};
pub use tutor_profile_repository::TutorProfileRepository;
pub use user_directory::UserDirectory;
