//! Error types for the domain layer.
//!
//! Three layers:
//! - [`ValidationError`] for value object construction
//! - [`DomainError`] for storage and infrastructure ports
//! - [`MarketplaceError`] for application handlers, which the HTTP adapter
//!   maps onto status codes

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::TransitionError;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' must be {min} to {max} characters long, got {actual}")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' contains a duplicate entry: {value}")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a length validation error. Lengths are counted in characters.
    pub fn invalid_length(field: impl Into<String>, min: usize, max: usize, actual: usize) -> Self {
        ValidationError::InvalidLength {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate entry validation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

/// Checks that a trimmed text field has a character count within bounds.
pub fn ensure_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.trim().chars().count();
    if actual == 0 && min > 0 {
        return Err(ValidationError::empty_field(field));
    }
    if actual < min || actual > max {
        return Err(ValidationError::invalid_length(field, min, max, actual));
    }
    Ok(())
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    NotFound,
    BookingNotFound,
    TutorNotFound,
    ProfileNotFound,
    UserNotFound,

    // State errors
    InvalidStateTransition,
    SlotUnavailable,
    FeedbackAlreadySubmitted,
    FulfillmentInProgress,
    Conflict,

    // Authorization errors
    Unauthorized,
    Forbidden,
    InvalidSignature,

    // Upstream errors
    PaymentProviderError,
    MeetingProviderError,
    NotificationError,

    // Infrastructure errors
    DatabaseError,
    CacheError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorCode::TutorNotFound => "TUTOR_NOT_FOUND",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SlotUnavailable => "SLOT_UNAVAILABLE",
            ErrorCode::FeedbackAlreadySubmitted => "FEEDBACK_ALREADY_SUBMITTED",
            ErrorCode::FulfillmentInProgress => "FULFILLMENT_IN_PROGRESS",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::PaymentProviderError => "PAYMENT_PROVIDER_ERROR",
            ErrorCode::MeetingProviderError => "MEETING_PROVIDER_ERROR",
            ErrorCode::NotificationError => "NOTIFICATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CacheError => "CACHE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a not-found error carrying the missing id.
    pub fn not_found(code: ErrorCode, id: impl fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(code, format!("{} not found", id)).with_detail("id", id)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.field().to_string(), err.to_string())
    }
}

/// Application-level failure returned by command handlers.
///
/// Each variant corresponds to one caller-facing outcome; the HTTP adapter
/// maps them one-to-one onto status codes.
#[derive(Debug, Clone, Error)]
pub enum MarketplaceError {
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No caller identity on a route that needs one.
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller is known but not permitted.
    #[error("Not authorized: {0}")]
    Forbidden(String),

    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Webhook authenticity check failed.
    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// Request collides with existing state.
    #[error("{message}")]
    Conflict { code: ErrorCode, message: String },

    /// Entity is not in a state that permits the operation.
    #[error("Cannot {action} while {current}")]
    InvalidState { current: String, action: String },

    /// Payment, meeting or mail provider failure.
    #[error("{provider} failed: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
        retryable: bool,
    },

    /// Storage or other internal failure.
    #[error("{0}")]
    Infrastructure(DomainError),
}

impl MarketplaceError {
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_state(current: impl fmt::Display, action: impl Into<String>) -> Self {
        Self::InvalidState {
            current: current.to_string(),
            action: action.into(),
        }
    }

    pub fn upstream(provider: &'static str, message: impl Into<String>, retryable: bool) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
            retryable,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Unauthenticated => ErrorCode::Unauthorized,
            Self::Forbidden(_) => ErrorCode::Forbidden,
            Self::NotFound { entity, .. } => match *entity {
                "Booking" => ErrorCode::BookingNotFound,
                "Tutor" => ErrorCode::TutorNotFound,
                "Tutor profile" => ErrorCode::ProfileNotFound,
                "User" => ErrorCode::UserNotFound,
                _ => ErrorCode::NotFound,
            },
            Self::InvalidSignature(_) => ErrorCode::InvalidSignature,
            Self::Conflict { code, .. } => *code,
            Self::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            Self::Upstream { provider, .. } => match *provider {
                "payment provider" => ErrorCode::PaymentProviderError,
                "meeting provider" => ErrorCode::MeetingProviderError,
                _ => ErrorCode::NotificationError,
            },
            Self::Infrastructure(err) => err.code,
        }
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { retryable, .. } => *retryable,
            Self::Infrastructure(err) => {
                matches!(err.code, ErrorCode::DatabaseError | ErrorCode::CacheError)
            }
            _ => false,
        }
    }
}

impl From<DomainError> for MarketplaceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                Self::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::NotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::TutorNotFound
            | ErrorCode::ProfileNotFound
            | ErrorCode::UserNotFound => {
                let entity = match err.code {
                    ErrorCode::BookingNotFound => "Booking",
                    ErrorCode::TutorNotFound => "Tutor",
                    ErrorCode::ProfileNotFound => "Tutor profile",
                    ErrorCode::UserNotFound => "User",
                    _ => "Resource",
                };
                let id = err.details.get("id").cloned().unwrap_or(err.message);
                Self::NotFound { entity, id }
            }
            _ => Self::Infrastructure(err),
        }
    }
}

impl From<TransitionError> for MarketplaceError {
    fn from(err: TransitionError) -> Self {
        Self::InvalidState {
            current: err.from,
            action: format!("move to {}", err.to),
        }
    }
}
