//! Stripe payment provider adapter.
//!
//! Implements `PaymentProvider` against Stripe's Checkout API: one-off
//! payment sessions for a single tutoring hour, and verification of the
//! signed `checkout.session.*` webhooks that report completion.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay protection
//! - Secrets handled via `secrecy::SecretString`

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    hex_encode, SignatureHeader, StripeCheckoutSession, StripeErrorResponse, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    api_base_url: String,

    /// Reject test-mode events (production only).
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("require_livemode", &self.require_livemode)
            .finish()
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(config: StripeConfig, http_client: reqwest::Client) -> Self {
        Self { config, http_client }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// Rejects events older than five minutes or more than one minute in the
    /// future, then compares against every `v1` signature in constant time.
    fn verify_signature(&self, payload: &[u8], header: &SignatureHeader) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from the future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac = HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
            .map_err(|e| PaymentError::invalid_webhook(format!("Unusable webhook secret: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();
        let expected_bytes: &[u8] = expected.as_slice();

        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| expected_bytes.ct_eq(provided.as_slice()).unwrap_u8() == 1);

        if !matched {
            tracing::warn!(
                signatures = header.v1_signatures.len(),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a verified payload into the port's event type.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(event_id = %stripe_event.id, "Rejected test mode event in production");
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in production",
            ));
        }

        let event_type = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutSessionExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = match event_type {
            WebhookEventType::CheckoutSessionCompleted | WebhookEventType::CheckoutSessionExpired => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(stripe_event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;

                WebhookEventData::Checkout {
                    metadata: session.checkout_metadata(),
                    session_id: session.id,
                    payment_status: session.payment_status,
                }
            }
            WebhookEventType::Unknown(_) => WebhookEventData::Raw {
                json: stripe_event.data.object.to_string(),
            },
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }

    /// Form fields for `POST /v1/checkout/sessions`.
    fn checkout_form(request: &CreateCheckoutRequest) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("payment_method_types[0]".into(), "card".into()),
            ("line_items[0][price_data][currency]".into(), request.currency.clone()),
            (
                "line_items[0][price_data][product_data][name]".into(),
                request.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".into(),
                request.product_description.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                request.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".into(), "1".into()),
            ("client_reference_id".into(), request.booking_id.to_string()),
            ("success_url".into(), request.success_url.clone()),
            ("cancel_url".into(), request.cancel_url.clone()),
        ];

        if !request.customer_email.trim().is_empty() {
            params.push(("customer_email".into(), request.customer_email.clone()));
        }

        for (key, value) in request.metadata.entries() {
            params.push((format!("metadata[{}]", key), value.to_string()));
        }

        params
    }

    async fn api_error(response: reqwest::Response) -> PaymentError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            400 | 402 | 404 => PaymentErrorCode::InvalidRequest,
            429 => PaymentErrorCode::RateLimitExceeded,
            _ => PaymentErrorCode::ProviderError,
        };

        match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(parsed) => {
                let message = parsed
                    .error
                    .message
                    .unwrap_or_else(|| format!("Stripe API error ({})", status));
                let mut err = PaymentError::new(code, message);
                if let Some(provider_code) = parsed.error.code.or(parsed.error.error_type) {
                    err = err.with_provider_code(provider_code);
                }
                err
            }
            Err(_) => PaymentError::new(code, format!("Stripe API error ({}): {}", status, body)),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = Self::checkout_form(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::api_error(response).await;
            tracing::error!(
                booking_id = %request.booking_id,
                code = %err.code,
                error = %err.message,
                "Stripe rejected checkout session"
            );
            return Err(err);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let url = session
            .url
            .ok_or_else(|| PaymentError::provider("Stripe checkout session has no URL"))?;

        tracing::info!(
            booking_id = %request.booking_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(CheckoutSession {
            id: session.id,
            url,
            expires_at: session.expires_at,
        })
    }

    async fn verify_webhook(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent, PaymentError> {
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        self.verify_signature(payload, &header)?;

        let event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %event.id,
            event_type = event.event_type.as_str(),
            "Webhook signature verified"
        );

        Ok(event)
    }
}

/// Computes a `Stripe-Signature` header value for `payload`.
///
/// Used by tests and local tooling that replay webhooks.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, PaymentError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::invalid_webhook(format!("Unusable webhook secret: {}", e)))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes())))
}
