//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest accepted HS256 secret.
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: SecretString,

    /// Expected `iss` claim, when tokens carry one
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_BYTES));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            issuer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_rejected() {
        assert_eq!(
            AuthConfig::default().validate(),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn short_secret_is_rejected() {
        let config = AuthConfig {
            jwt_secret: SecretString::new("too-short".to_string()),
            issuer: None,
        };
        assert_eq!(config.validate(), Err(ValidationError::JwtSecretTooShort(32)));
    }

    #[test]
    fn long_secret_is_accepted() {
        let config = AuthConfig {
            jwt_secret: SecretString::new("a".repeat(48)),
            issuer: Some("yourtutor-web".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = AuthConfig {
            jwt_secret: SecretString::new("super-secret-signing-key-0123456789".to_string()),
            issuer: None,
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
