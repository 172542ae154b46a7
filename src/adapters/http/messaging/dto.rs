//! Request and response bodies for messaging endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::messaging::Message;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub text: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            receiver_id: message.receiver_id.to_string(),
            text: message.text.clone(),
            is_read: message.is_read,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}
