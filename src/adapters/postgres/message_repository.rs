//! PostgreSQL implementation of MessageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, stored_user_id};
use crate::domain::foundation::{DomainError, MessageId, Timestamp, UserId};
use crate::domain::messaging::Message;
use crate::ports::MessageRepository;

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    sender_id: String,
    receiver_id: String,
    text: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::from_uuid(row.id),
            sender_id: stored_user_id("sender_id", row.sender_id)?,
            receiver_id: stored_user_id("receiver_id", row.receiver_id)?,
            text: row.text,
            is_read: row.is_read,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, text, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.sender_id.as_str())
        .bind(message.receiver_id.as_str())
        .bind(&message.text)
        .bind(message.is_read)
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save message", e))?;

        Ok(())
    }

    async fn conversation(&self, a: &UserId, b: &UserId) -> Result<Vec<Message>, DomainError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, sender_id, receiver_id, text, is_read, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(a.as_str())
        .bind(b.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load conversation", e))?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn mark_read(&self, sender: &UserId, receiver: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE WHERE sender_id = $1 AND receiver_id = $2 AND NOT is_read",
        )
        .bind(sender.as_str())
        .bind(receiver.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark messages read", e))?;

        Ok(result.rows_affected())
    }

    async fn unread_count(&self, receiver: &UserId) -> Result<u64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND NOT is_read")
                .bind(receiver.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count unread messages", e))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
