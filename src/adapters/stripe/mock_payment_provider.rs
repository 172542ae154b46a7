//! Mock payment provider for testing.
//!
//! Provides a configurable implementation of `PaymentProvider` for unit and
//! integration tests. Supports:
//! - Pre-configured checkout sessions
//! - Error injection per method
//! - Call tracking with the full checkout request
//! - Webhook parsing from plain JSON, with optional signature checking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutMetadata, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};

/// Mock payment provider for testing.
///
/// ```ignore
/// let payments = MockPaymentProvider::new();
/// payments.set_method_error("create_checkout_session", PaymentError::network("down"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<CheckoutSession>,
    next_webhook_event: Option<WebhookEvent>,
    method_errors: HashMap<String, PaymentError>,
    checkout_requests: Vec<CreateCheckoutRequest>,
    call_log: Vec<String>,
    webhook_verify_mode: WebhookVerifyMode,
}

#[derive(Default, Clone)]
enum WebhookVerifyMode {
    /// Accept any signature.
    #[default]
    AcceptAll,

    /// Accept only this exact header value.
    RequireSignature(String),

    AlwaysFail,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that fails every webhook verification.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().webhook_verify_mode = WebhookVerifyMode::AlwaysFail;
        mock
    }

    /// A mock that only accepts the given `Stripe-Signature` value.
    pub fn requiring_signature(signature: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().webhook_verify_mode = WebhookVerifyMode::RequireSignature(signature.into());
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration
    // ════════════════════════════════════════════════════════════════════════════

    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Event returned by `verify_webhook` instead of parsing the payload.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Fail every call to `method` until cleared.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        self.inner.lock().unwrap().method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    /// Checkout requests received, oldest first.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    fn record_call(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(method.to_string());
        match state.method_errors.get(method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Event builders
    // ════════════════════════════════════════════════════════════════════════════

    /// A paid `checkout.session.completed` event.
    pub fn checkout_completed_event(session_id: &str, metadata: CheckoutMetadata) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_{}", uuid::Uuid::new_v4().simple()),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: session_id.to_string(),
                payment_status: Some("paid".to_string()),
                metadata,
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    fn parse_payload(payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let parsed: serde_json::Value =
            serde_json::from_slice(payload).map_err(|e| PaymentError::invalid_webhook(format!("Invalid JSON: {}", e)))?;

        let id = parsed["id"].as_str().unwrap_or("evt_mock").to_string();
        let created_at = parsed["created"]
            .as_i64()
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        let object = &parsed["data"]["object"];

        let event_type = match parsed["type"].as_str().unwrap_or("unknown") {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutSessionExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = match event_type {
            WebhookEventType::Unknown(_) => WebhookEventData::Raw {
                json: object.to_string(),
            },
            _ => WebhookEventData::Checkout {
                session_id: object["id"].as_str().unwrap_or_default().to_string(),
                payment_status: object["payment_status"].as_str().map(str::to_string),
                metadata: serde_json::from_value(object["metadata"].clone()).unwrap_or_default(),
            },
        };

        Ok(WebhookEvent {
            id,
            event_type,
            data,
            created_at,
        })
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();
        state.checkout_requests.push(request);

        let session = state.next_checkout.take().unwrap_or_else(|| {
            let id = format!("cs_mock_{}", uuid::Uuid::new_v4().simple());
            CheckoutSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
                expires_at: Some(chrono::Utc::now().timestamp() + 24 * 60 * 60),
            }
        });

        Ok(session)
    }

    async fn verify_webhook(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent, PaymentError> {
        self.record_call("verify_webhook")?;

        let state = self.inner.lock().unwrap();
        match &state.webhook_verify_mode {
            WebhookVerifyMode::AcceptAll => {}
            WebhookVerifyMode::RequireSignature(required) => {
                if signature != required {
                    return Err(PaymentError::invalid_webhook("Invalid signature"));
                }
            }
            WebhookVerifyMode::AlwaysFail => {
                return Err(PaymentError::invalid_webhook("Verification disabled"));
            }
        }

        if let Some(event) = &state.next_webhook_event {
            return Ok(event.clone());
        }

        Self::parse_payload(payload)
    }
}
