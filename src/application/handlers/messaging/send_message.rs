//! SendMessageHandler - Direct message between two users.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MarketplaceError, UserId};
use crate::domain::messaging::Message;
use crate::ports::{Contact, MessageRepository, Notification, Notifier, UserDirectory};

/// Characters of the message body included in the email preview.
const PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub sender: AuthenticatedUser,
    pub receiver: UserId,
    pub text: String,
}

pub struct SendMessageHandler {
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl SendMessageHandler {
    pub fn new(messages: Arc<dyn MessageRepository>, users: Arc<dyn UserDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            messages,
            users,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<Message, MarketplaceError> {
        let message = Message::compose(cmd.sender.id.clone(), cmd.receiver.clone(), &cmd.text)?;

        let receiver = self
            .users
            .find_by_id(&cmd.receiver)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("User", &cmd.receiver))?;

        self.messages.save(&message).await?;

        let preview: String = message.text.chars().take(PREVIEW_CHARS).collect();
        let notification = Notification::NewMessage {
            recipient: Contact::from(&receiver),
            sender_name: cmd.sender.display_name_or_email().to_string(),
            preview,
        };
        if let Err(err) = self.notifier.notify(notification).await {
            tracing::warn!(message_id = %message.id, error = %err, "Message stored but notification failed");
        }

        Ok(message)
    }
}
