//! GetUnreadCountHandler - Badge count for the inbox.

use std::sync::Arc;

use crate::domain::foundation::{MarketplaceError, UserId};
use crate::ports::MessageRepository;

pub struct GetUnreadCountHandler {
    messages: Arc<dyn MessageRepository>,
}

impl GetUnreadCountHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(&self, user: &UserId) -> Result<u64, MarketplaceError> {
        Ok(self.messages.unread_count(user).await?)
    }
}
