//! Redis-backed token cache for multi-instance deployments.
//!
//! Each token is stored as JSON under `{prefix}{key}` with a Redis TTL equal
//! to its remaining lifetime, so stale tokens disappear on their own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{CachedToken, TokenCache};

const DEFAULT_PREFIX: &str = "yourtutor:token:";

#[derive(Serialize, Deserialize)]
struct StoredToken {
    value: String,
    expires_at: Timestamp,
}

#[derive(Clone)]
pub struct RedisTokenCache {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisTokenCache {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn redis_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

fn cache_error(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, e.to_string())
}

/// Whole seconds until `expires_at`, or `None` once it has passed.
fn remaining_ttl_secs(expires_at: &Timestamp, now: &Timestamp) -> Option<u64> {
    let secs = expires_at
        .as_datetime()
        .signed_duration_since(*now.as_datetime())
        .num_seconds();
    u64::try_from(secs).ok().filter(|secs| *secs > 0)
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, key: &str) -> Result<Option<CachedToken>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.redis_key(key)).await.map_err(cache_error)?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<StoredToken>(&raw) {
            Ok(stored) => Ok(Some(CachedToken::new(stored.value, stored.expires_at))),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable cached token");
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &str, token: CachedToken) -> Result<(), DomainError> {
        let Some(ttl_secs) = remaining_ttl_secs(&token.expires_at, &Timestamp::now()) else {
            return Ok(());
        };

        let stored = StoredToken {
            value: token.value.expose_secret().to_string(),
            expires_at: token.expires_at,
        };
        let raw = serde_json::to_string(&stored)
            .map_err(|e| DomainError::new(ErrorCode::CacheError, e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.redis_key(key), raw, ttl_secs)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.redis_key(key)).await.map_err(cache_error)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTokenCache")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
