//! GetConversationHandler - Reads a thread and marks incoming messages read.

use std::sync::Arc;

use crate::domain::foundation::{MarketplaceError, UserId};
use crate::domain::messaging::Message;
use crate::ports::MessageRepository;

#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub user: UserId,
    pub other: UserId,
}

pub struct GetConversationHandler {
    messages: Arc<dyn MessageRepository>,
}

impl GetConversationHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Thread between the two users, oldest first.
    pub async fn handle(&self, query: GetConversationQuery) -> Result<Vec<Message>, MarketplaceError> {
        let marked = self.messages.mark_read(&query.other, &query.user).await?;
        if marked > 0 {
            tracing::debug!(user_id = %query.user, marked, "Marked messages read");
        }
        Ok(self.messages.conversation(&query.user, &query.other).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMessageRepository;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn reading_marks_only_incoming_messages() {
        let repo = InMemoryMessageRepository::new();
        repo.save(&Message::compose(user("a"), user("b"), "first").unwrap()).await.unwrap();
        repo.save(&Message::compose(user("b"), user("a"), "reply").unwrap()).await.unwrap();
        repo.save(&Message::compose(user("c"), user("a"), "elsewhere").unwrap()).await.unwrap();

        let handler = GetConversationHandler::new(Arc::new(repo.clone()));
        let thread = handler
            .handle(GetConversationQuery {
                user: user("a"),
                other: user("b"),
            })
            .await
            .unwrap();

        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].text, "first");
        assert!(thread[1].is_read);
        assert!(!thread[0].is_read);
        assert_eq!(repo.unread_count(&user("a")).await.unwrap(), 1);
        assert_eq!(repo.unread_count(&user("b")).await.unwrap(), 1);
    }
}
