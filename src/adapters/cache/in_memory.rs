//! In-memory token cache for testing and single-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{CachedToken, TokenCache};

/// Process-local token cache.
///
/// Expiry is not enforced here; callers check [`CachedToken::is_fresh`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenCache {
    entries: Arc<RwLock<HashMap<String, CachedToken>>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn get(&self, key: &str) -> Result<Option<CachedToken>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, token: CachedToken) -> Result<(), DomainError> {
        self.entries.write().await.insert(key.to_string(), token);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn put_then_get_returns_token() {
        let cache = InMemoryTokenCache::new();
        let expires = Timestamp::now().plus_secs(3300);
        cache.put("zoom", CachedToken::new("abc", expires)).await.unwrap();

        let token = cache.get("zoom").await.unwrap().unwrap();
        assert_eq!(token.value.expose_secret(), "abc");
        assert_eq!(token.expires_at, expires);
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = InMemoryTokenCache::new();
        cache
            .put("zoom", CachedToken::new("abc", Timestamp::now().plus_secs(60)))
            .await
            .unwrap();
        cache.invalidate("zoom").await.unwrap();

        assert!(cache.get("zoom").await.unwrap().is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let cache = InMemoryTokenCache::new();
        assert!(cache.get("nothing").await.unwrap().is_none());
    }
}
