//! Direct message persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::messaging::Message;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: &Message) -> Result<(), DomainError>;

    /// Messages between `a` and `b` in both directions, oldest first.
    async fn conversation(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, DomainError>;

    /// Marks every unread message from `sender` to `receiver` read. Returns the count.
    async fn mark_read(&self, sender: &UserId, receiver: &UserId) -> Result<u64, DomainError>;

    /// Unread messages addressed to `receiver`.
    async fn unread_count(&self, receiver: &UserId) -> Result<u64, DomainError>;
}
