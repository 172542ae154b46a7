//! HandlePaymentWebhookHandler - Command handler for payment provider webhooks.

use std::sync::Arc;

use crate::domain::foundation::{BookingId, MarketplaceError};
use crate::ports::{PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType};

use super::{FulfillBookingCommand, FulfillBookingHandler, FulfillmentOutcome};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// Webhook signature header.
    pub signature: String,
}

/// Result of webhook processing.
///
/// Every variant is acknowledged to the provider except an
/// [`InProgress`](FulfillmentOutcome::InProgress) fulfillment, which asks
/// for redelivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// A payment-completion event went through the orchestrator.
    Fulfillment(FulfillmentOutcome),
    /// Event acknowledged, no action taken.
    Ignored { event_type: String },
    /// Fulfillment failed after verification; logged and acknowledged.
    Failed { reason: String },
}

impl HandlePaymentWebhookResult {
    pub fn requires_redelivery(&self) -> bool {
        matches!(self, HandlePaymentWebhookResult::Fulfillment(outcome) if outcome.requires_redelivery())
    }
}

/// Handler for processing payment provider webhooks.
///
/// Unverified payloads are rejected with `InvalidSignature`. Once verified,
/// nothing is surfaced as an error, so the provider does not retry forever.
pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    fulfillment: Arc<FulfillBookingHandler>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, fulfillment: Arc<FulfillBookingHandler>) -> Self {
        Self {
            payment_provider,
            fulfillment,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, MarketplaceError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Rejected payment webhook");
                MarketplaceError::InvalidSignature(err.message)
            })?;

        tracing::debug!(event_id = %event.id, event_type = event.event_type.as_str(), "Payment webhook received");

        // 2. Dispatch
        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => Ok(self.handle_checkout_completed(&event).await),
            WebhookEventType::CheckoutSessionExpired | WebhookEventType::Unknown(_) => {
                Ok(HandlePaymentWebhookResult::Ignored {
                    event_type: event.event_type.as_str().to_string(),
                })
            }
        }
    }

    async fn handle_checkout_completed(&self, event: &WebhookEvent) -> HandlePaymentWebhookResult {
        let (session_id, payment_status, metadata) = match &event.data {
            WebhookEventData::Checkout {
                session_id,
                payment_status,
                metadata,
            } => (session_id, payment_status, metadata),
            WebhookEventData::Raw { .. } => {
                tracing::error!(event_id = %event.id, "checkout.session.completed without checkout data");
                return HandlePaymentWebhookResult::Failed {
                    reason: "unexpected event payload".to_string(),
                };
            }
        };

        // Delayed payment methods complete the session before the money arrives.
        if payment_status.as_deref() == Some("unpaid") {
            tracing::info!(event_id = %event.id, session_id = %session_id, "Checkout completed but unpaid, ignoring");
            return HandlePaymentWebhookResult::Ignored {
                event_type: event.event_type.as_str().to_string(),
            };
        }

        let booking_id = metadata.booking_id.as_deref().and_then(|raw| match raw.parse::<BookingId>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(event_id = %event.id, booking_id = raw, "Malformed bookingId in metadata, using session id");
                None
            }
        });

        let cmd = FulfillBookingCommand {
            booking_id,
            payment_session_id: (!session_id.is_empty()).then(|| session_id.clone()),
            start_time: metadata.start_time.clone(),
        };

        match self.fulfillment.handle(cmd).await {
            Ok(outcome) => HandlePaymentWebhookResult::Fulfillment(outcome),
            Err(err) => {
                tracing::error!(
                    event_id = %event.id,
                    session_id = %session_id,
                    error = %err,
                    "Booking fulfillment failed; manual remediation required"
                );
                HandlePaymentWebhookResult::Failed { reason: err.to_string() }
            }
        }
    }
}
