//! SubmitInquiryHandler - Stores a contact-form inquiry and acknowledges it.

use std::sync::Arc;

use crate::domain::foundation::MarketplaceError;
use crate::domain::inquiry::{Inquiry, InquiryForm};
use crate::ports::{Clock, InquiryRepository, Notification, Notifier};

#[derive(Debug, Clone)]
pub struct SubmitInquiryCommand {
    pub form: InquiryForm,
}

pub struct SubmitInquiryHandler {
    inquiries: Arc<dyn InquiryRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl SubmitInquiryHandler {
    pub fn new(inquiries: Arc<dyn InquiryRepository>, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inquiries,
            notifier,
            clock,
        }
    }

    pub async fn handle(&self, cmd: SubmitInquiryCommand) -> Result<Inquiry, MarketplaceError> {
        let inquiry = Inquiry::submit(cmd.form, self.clock.now())?;
        self.inquiries.save(&inquiry).await?;
        tracing::info!(inquiry_id = %inquiry.id, "Contact inquiry stored");

        // The visitor already has their answer once the inquiry is stored.
        let notification = Notification::InquiryReceived {
            inquiry: inquiry.clone(),
        };
        if let Err(err) = self.notifier.notify(notification).await {
            tracing::warn!(inquiry_id = %inquiry.id, error = %err, "Inquiry stored but emails failed");
        }

        Ok(inquiry)
    }
}
