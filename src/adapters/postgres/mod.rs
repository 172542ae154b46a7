//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresBookingRepository` - Bookings, fulfillment claims and meeting details
//! - `PostgresTutorProfileRepository` - Tutor profiles and their availability slots
//! - `PostgresFeedbackRepository` - One feedback row per booking
//! - `PostgresUserDirectory` - Accounts and tutor review state
//! - `PostgresMessageRepository` - Direct messages
//! - `PostgresInquiryRepository` - Contact-form inquiries

mod booking_repository;
mod feedback_repository;
mod inquiry_repository;
mod message_repository;
mod tutor_profile_repository;
mod user_directory;

pub use booking_repository::PostgresBookingRepository;
pub use feedback_repository::PostgresFeedbackRepository;
pub use inquiry_repository::PostgresInquiryRepository;
pub use message_repository::PostgresMessageRepository;
pub use tutor_profile_repository::PostgresTutorProfileRepository;
pub use user_directory::PostgresUserDirectory;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Wraps a sqlx failure with the operation that hit it.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

/// True if `err` violated the named unique constraint.
pub(crate) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

/// Rebuilds a stored user id, treating a malformed value as corrupt data.
pub(crate) fn stored_user_id(column: &str, value: String) -> Result<UserId, DomainError> {
    UserId::new(value)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", column, e)))
}

/// Parses a stored enum column, treating an unknown value as corrupt data.
pub(crate) fn stored_enum<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
{
    value.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value: {}", column, value),
        )
    })
}
