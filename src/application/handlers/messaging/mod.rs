//! Messaging handlers for poll-based direct messages.

mod get_conversation;
mod get_unread_count;
mod send_message;

pub use get_conversation::{GetConversationHandler, GetConversationQuery};
pub use get_unread_count::GetUnreadCountHandler;
pub use send_message::{SendMessageCommand, SendMessageHandler};
