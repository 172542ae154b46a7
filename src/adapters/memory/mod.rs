//! In-memory implementations of the storage ports.
//!
//! Used by tests and local runs without Postgres. Each store is cheap to
//! clone and shares its state between clones.

mod booking_repository;
mod feedback_repository;
mod inquiry_repository;
mod message_repository;
mod tutor_profile_repository;
mod user_directory;

pub use booking_repository::InMemoryBookingRepository;
pub use feedback_repository::InMemoryFeedbackRepository;
pub use inquiry_repository::InMemoryInquiryRepository;
pub use message_repository::InMemoryMessageRepository;
pub use tutor_profile_repository::InMemoryTutorProfileRepository;
pub use user_directory::InMemoryUserDirectory;
