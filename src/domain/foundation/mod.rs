//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, error types and the state machine trait that
//! the booking, tutor and messaging modules are built from.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{ensure_length, DomainError, ErrorCode, MarketplaceError, ValidationError};
pub use ids::{BookingId, FeedbackId, InquiryId, MessageId, UserId};
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
