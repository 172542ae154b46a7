//! HS256 JWT session validator.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

pub struct JwtSessionValidator {
    secret: SecretString,
    issuer: Option<String>,
}

impl JwtSessionValidator {
    pub fn new(secret: SecretString, issuer: Option<String>) -> Self {
        Self { secret, issuer }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 30;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let data = decode::<JwtClaims>(token, &key, &self.validation()).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => {
                tracing::debug!(error = %e, "Rejected session token");
                AuthError::InvalidToken
            }
        })?;

        let claims = data.claims;
        let id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, claims.email, claims.name))
    }
}
