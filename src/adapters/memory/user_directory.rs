//! In-memory user accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::tutor::UserAccount;
use crate::ports::UserDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account: UserAccount) {
        self.users.write().await.insert(account.id.clone(), account);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update(&self, account: &UserAccount) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let existing = users
            .get_mut(&account.id)
            .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, &account.id))?;
        *existing = account.clone();
        Ok(())
    }
}
