//! Messaging module - poll-based direct messages between users.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ensure_length, MessageId, Timestamp, UserId, ValidationError};

/// A direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl Message {
    pub const MAX_CHARS: usize = 1000;

    /// Composes an unread message.
    pub fn compose(sender_id: UserId, receiver_id: UserId, text: &str) -> Result<Self, ValidationError> {
        if sender_id == receiver_id {
            return Err(ValidationError::invalid_format(
                "receiverId",
                "cannot send a message to yourself",
            ));
        }
        ensure_length("messageText", text, 1, Self::MAX_CHARS)?;

        Ok(Self {
            id: MessageId::new(),
            sender_id,
            receiver_id,
            text: text.trim().to_string(),
            is_read: false,
            created_at: Timestamp::now(),
        })
    }

    /// True if the message travels between `a` and `b` in either direction.
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (self.sender_id == *a && self.receiver_id == *b) || (self.sender_id == *b && self.receiver_id == *a)
    }
}
