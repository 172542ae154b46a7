//! In-memory direct messages.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::messaging::Message;
use crate::ports::MessageRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn conversation(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, DomainError> {
        let mut thread: Vec<Message> = self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        thread.sort_by_key(|m| m.created_at);
        Ok(thread)
    }

    async fn mark_read(&self, sender: &UserId, receiver: &UserId) -> Result<u64, DomainError> {
        let mut updated = 0;
        for message in self.messages.write().await.iter_mut() {
            if message.sender_id == *sender && message.receiver_id == *receiver && !message.is_read {
                message.is_read = true;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn unread_count(&self, receiver: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.receiver_id == *receiver && !m.is_read)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn mark_read_only_touches_one_direction() {
        let repo = InMemoryMessageRepository::new();
        repo.save(&Message::compose(user("a"), user("b"), "hi b").unwrap()).await.unwrap();
        repo.save(&Message::compose(user("a"), user("b"), "still there?").unwrap()).await.unwrap();
        repo.save(&Message::compose(user("b"), user("a"), "hi a").unwrap()).await.unwrap();

        assert_eq!(repo.unread_count(&user("b")).await.unwrap(), 2);
        assert_eq!(repo.mark_read(&user("a"), &user("b")).await.unwrap(), 2);
        assert_eq!(repo.unread_count(&user("b")).await.unwrap(), 0);
        assert_eq!(repo.unread_count(&user("a")).await.unwrap(), 1);
        assert_eq!(repo.conversation(&user("b"), &user("a")).await.unwrap().len(), 3);
    }
}
