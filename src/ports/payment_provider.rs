//! Payment provider port for hosted checkout.
//!
//! The provider creates a hosted payment page for a pending booking and later
//! reports completion through a signed webhook.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::booking::MinorUnits;
use crate::domain::foundation::{BookingId, MarketplaceError};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a one-off hosted checkout session.
    ///
    /// Returns the provider's session id and the URL to redirect the payer to.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Verify a webhook signature against the shared secret and parse the event.
    ///
    /// Fails with [`PaymentErrorCode::InvalidWebhook`] when the signature does
    /// not match; callers must reject such payloads.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Correlation data attached to a checkout session and echoed by its webhook.
///
/// Keys are camelCase on the wire. Every field is optional on the way back in
/// because the provider returns whatever was stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutMetadata {
    pub booking_id: Option<String>,
    pub student_id: Option<String>,
    pub tutor_id: Option<String>,
    pub start_time: Option<String>,
}

impl CheckoutMetadata {
    /// Metadata key/value pairs as stored at the provider.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("bookingId", self.booking_id.as_deref()),
            ("studentId", self.student_id.as_deref()),
            ("tutorId", self.tutor_id.as_deref()),
            ("startTime", self.start_time.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

/// Request to create a checkout session for one booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    pub booking_id: BookingId,

    /// Payer email for pre-fill.
    pub customer_email: String,

    /// Line item name shown on the payment page.
    pub product_name: String,

    pub product_description: String,

    /// Price of the single line item in minor units.
    pub unit_amount: MinorUnits,

    /// ISO 4217 currency code, lowercase.
    pub currency: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after abandoned checkout.
    pub cancel_url: String,

    pub metadata: CheckoutMetadata,
}

/// Hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the payer to complete checkout.
    pub url: String,

    /// When the session expires (Unix timestamp), if reported.
    pub expires_at: Option<i64>,
}

/// Verified webhook event from the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,

    pub event_type: WebhookEventType,

    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Event types the marketplace distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Payer completed a checkout session.
    CheckoutSessionCompleted,

    /// Checkout session expired unpaid.
    CheckoutSessionExpired,

    /// Anything else; acknowledged and ignored.
    Unknown(String),
}

impl WebhookEventType {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::CheckoutSessionCompleted => "checkout.session.completed",
            WebhookEventType::CheckoutSessionExpired => "checkout.session.expired",
            WebhookEventType::Unknown(name) => name,
        }
    }
}

/// Webhook event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Checkout session data.
    #[serde(rename = "checkout")]
    Checkout {
        session_id: String,
        /// `paid`, `unpaid` or `no_payment_required`.
        payment_status: Option<String>,
        metadata: CheckoutMetadata,
    },

    /// Raw/unknown event data.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    pub fn is_signature_failure(&self) -> bool {
        self.code == PaymentErrorCode::InvalidWebhook
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for MarketplaceError {
    fn from(err: PaymentError) -> Self {
        if err.is_signature_failure() {
            return MarketplaceError::InvalidSignature(err.message);
        }
        MarketplaceError::upstream("payment provider", err.to_string(), err.retryable)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Request rejected as malformed.
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Invalid webhook signature or payload.
    InvalidWebhook,

    /// Provider API error.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::RateLimitExceeded
                | PaymentErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
