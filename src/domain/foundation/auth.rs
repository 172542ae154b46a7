//! Authentication types for the domain layer.
//!
//! Session issuance lives with the external identity provider. Handlers only
//! see an [`AuthenticatedUser`] that the `SessionValidator` port produced from
//! a bearer token. Roles and tutor approval are not trusted from the token;
//! they are read from the user directory when an operation depends on them.

use super::UserId;
use thiserror::Error;

/// Caller identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject claim, the stable user identifier.
    pub id: UserId,

    /// Email address from the token claims.
    pub email: String,

    /// Display name if the token carries one.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_or_email_prefers_name() {
        let user = AuthenticatedUser::new(
            UserId::new("student-1").unwrap(),
            "ana@example.com",
            Some("Ana".to_string()),
        );
        assert_eq!(user.display_name_or_email(), "Ana");
    }

    #[test]
    fn display_name_or_email_falls_back_to_email() {
        let user = AuthenticatedUser::new(UserId::new("student-1").unwrap(), "ana@example.com", None);
        assert_eq!(user.display_name_or_email(), "ana@example.com");
    }

    #[test]
    fn only_service_errors_are_transient() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidToken.is_transient());
        assert!(!AuthError::TokenExpired.is_transient());
    }
}
