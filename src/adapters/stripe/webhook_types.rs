//! Stripe wire types for checkout sessions and webhook envelopes.
//!
//! Only the fields the marketplace reads are modelled; everything else in
//! Stripe's payloads is ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ports::CheckoutMetadata;

// ════════════════════════════════════════════════════════════════════════════════
// Signature Parsing
// ════════════════════════════════════════════════════════════════════════════════

/// Error parsing the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureParseError {
    #[error("Missing Stripe-Signature header")]
    MissingHeader,

    #[error("Missing timestamp (t=) in signature")]
    MissingTimestamp,

    #[error("Missing v1 signature in header")]
    MissingV1Signature,

    #[error("Invalid timestamp format")]
    InvalidTimestamp,

    #[error("Invalid signature format (not valid hex)")]
    InvalidSignatureFormat,
}

/// Parsed `Stripe-Signature` header: `t=<unix>,v1=<hex>[,v1=<hex>...]`.
///
/// Stripe sends several `v1` entries while a signing secret is being rolled,
/// so all of them are kept and any one may match.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Unix timestamp when Stripe signed the event.
    pub timestamp: i64,

    /// HMAC-SHA256 signatures, hex-decoded.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        if header.trim().is_empty() {
            return Err(SignatureParseError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureParseError::MissingTimestamp)?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureParseError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    let sig = hex_decode(value).ok_or(SignatureParseError::InvalidSignatureFormat)?;
                    v1_signatures.push(sig);
                }
                // v0 and unknown schemes are ignored
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if v1_signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| hex.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

/// Encode bytes to a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Event Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeWebhookEvent {
    /// Event identifier (evt_...).
    pub id: String,

    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp of event creation.
    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object the event is about.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Session
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session, as returned on creation and inside webhooks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Session identifier (cs_...).
    pub id: String,

    /// Hosted payment page. Absent once the session is complete.
    pub url: Option<String>,

    /// `paid`, `unpaid` or `no_payment_required`.
    pub payment_status: Option<String>,

    /// `open`, `complete` or `expired`.
    pub status: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,

    pub expires_at: Option<i64>,
}

impl StripeCheckoutSession {
    /// Correlation metadata written at checkout creation.
    pub fn checkout_metadata(&self) -> CheckoutMetadata {
        let get = |key: &str| {
            self.metadata
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        CheckoutMetadata {
            booking_id: get("bookingId"),
            student_id: get("studentId"),
            tutor_id: get("tutorId"),
            start_time: get("startTime"),
        }
    }
}

/// Error body returned by the Stripe API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_with_single_signature() {
        let header = SignatureHeader::parse("t=1704067200,v1=abcd").unwrap();
        assert_eq!(header.timestamp, 1704067200);
        assert_eq!(header.v1_signatures, vec![vec![0xab, 0xcd]]);
    }

    #[test]
    fn parse_header_keeps_every_v1_and_skips_v0() {
        let header = SignatureHeader::parse("t=1,v1=00ff,v0=1234,v1=ff00").unwrap();
        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_errors() {
        assert_eq!(
            SignatureHeader::parse("").unwrap_err(),
            SignatureParseError::MissingHeader
        );
        assert_eq!(
            SignatureHeader::parse("v1=abcd").unwrap_err(),
            SignatureParseError::MissingTimestamp
        );
        assert_eq!(
            SignatureHeader::parse("t=1").unwrap_err(),
            SignatureParseError::MissingV1Signature
        );
        assert_eq!(
            SignatureHeader::parse("t=soon,v1=abcd").unwrap_err(),
            SignatureParseError::InvalidTimestamp
        );
        assert_eq!(
            SignatureHeader::parse("t=1,v1=xyz1").unwrap_err(),
            SignatureParseError::InvalidSignatureFormat
        );
        assert_eq!(
            SignatureHeader::parse("malformed").unwrap_err(),
            SignatureParseError::MissingTimestamp
        );
    }

    #[test]
    fn hex_encode_is_lowercase() {
        assert_eq!(hex_encode(&[0xAB, 0x01]), "ab01");
    }

    #[test]
    fn checkout_session_metadata_reads_camel_case_keys() {
        let session: StripeCheckoutSession = serde_json::from_str(
            r#"{
                "id": "cs_test_1",
                "object": "checkout.session",
                "url": null,
                "payment_status": "paid",
                "status": "complete",
                "metadata": {"bookingId": "b-1", "startTime": "14:00", "studentId": " "}
            }"#,
        )
        .unwrap();

        let metadata = session.checkout_metadata();
        assert_eq!(metadata.booking_id.as_deref(), Some("b-1"));
        assert_eq!(metadata.start_time.as_deref(), Some("14:00"));
        assert_eq!(metadata.student_id, None);
        assert_eq!(metadata.tutor_id, None);
    }

    #[test]
    fn checkout_session_tolerates_missing_metadata() {
        let session: StripeCheckoutSession =
            serde_json::from_str(r#"{"id": "cs_test_2", "url": "https://checkout.stripe.com/c/pay/cs_test_2"}"#)
                .unwrap();
        assert!(session.metadata.is_empty());
        assert_eq!(session.checkout_metadata(), CheckoutMetadata::default());
    }
}
