//! Credential cache port.
//!
//! Keyed store of short-lived bearer credentials with an expiry. Owned by the
//! adapter that uses it, so each adapter instance can get its own cache.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{DomainError, Timestamp};

/// A cached bearer credential.
#[derive(Clone)]
pub struct CachedToken {
    pub value: SecretString,
    /// Instant after which the token must not be used.
    pub expires_at: Timestamp,
}

impl CachedToken {
    pub fn new(value: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            value: SecretString::new(value.into()),
            expires_at,
        }
    }

    /// True while `now` is strictly before the expiry.
    pub fn is_fresh(&self, now: &Timestamp) -> bool {
        now.is_before(&self.expires_at)
    }
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Returns the stored token, fresh or not.
    async fn get(&self, key: &str) -> Result<Option<CachedToken>, DomainError>;

    async fn put(&self, key: &str, token: CachedToken) -> Result<(), DomainError>;

    async fn invalidate(&self, key: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_fresh_until_expiry() {
        let expiry = Timestamp::parse_rfc3339("t", "2025-03-10T12:00:00Z").unwrap();
        let token = CachedToken::new("abc", expiry);
        assert!(token.is_fresh(&expiry.plus_secs(-1)));
        assert!(!token.is_fresh(&expiry));
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let token = CachedToken::new("super-secret", Timestamp::now());
        assert!(!format!("{:?}", token).contains("super-secret"));
    }
}
