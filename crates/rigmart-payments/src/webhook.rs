//! Payment webhook signature verification and event parsing.
//!
//! The provider signs each delivery with a single header of the form
//! `t=<unix seconds>,v1=<hex hmac>`; the signed content is
//! `"{t}.{body}"` keyed with the endpoint secret.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::HashMap;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Kinds of payment events the backend reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentEventKind {
    /// The buyer completed the hosted checkout flow.
    #[serde(rename = "checkout.session.completed")]
    CheckoutSessionCompleted,
    /// The session expired before payment.
    #[serde(rename = "checkout.session.expired")]
    CheckoutSessionExpired,
}

/// The session snapshot embedded in a payment event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEventSession {
    /// Session id.
    pub id: String,
    /// Correlation data supplied at session creation.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A verified, parsed payment event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: PaymentEventKind,
    /// The session the event is about.
    pub data: PaymentEventObject,
}

/// Wrapper matching the provider's `{"data": {"object": ...}}` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEventObject {
    /// The session snapshot.
    pub object: PaymentEventSession,
}

/// Verify a delivery's signature and parse the event.
pub fn verify_and_parse(
    raw_body: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: DateTime<Utc>,
) -> AppResult<PaymentEvent> {
    verify_signature(raw_body, signature_header, secret, tolerance_seconds, now)?;

    serde_json::from_slice(raw_body)
        .map_err(|e| AppError::validation(format!("Malformed payment event payload: {e}")))
}

/// Verify the `t=..,v1=..` signature header against the raw body.
pub fn verify_signature(
    raw_body: &[u8],
    signature_header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let (timestamp, candidates) = parse_signature_header(signature_header)?;

    let skew = (now.timestamp() - timestamp).abs();
    if skew > tolerance_seconds {
        return Err(AppError::validation("Webhook timestamp outside tolerance"));
    }

    let mut signed_content = Vec::with_capacity(raw_body.len() + 12);
    signed_content.extend_from_slice(timestamp.to_string().as_bytes());
    signed_content.push(b'.');
    signed_content.extend_from_slice(raw_body);

    for candidate in candidates {
        let Ok(candidate_bytes) = hex::decode(&candidate) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| AppError::internal(format!("HMAC key error: {e}")))?;
        mac.update(&signed_content);
        if mac.verify_slice(&candidate_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(AppError::validation("Webhook signature mismatch"))
}

/// Split `t=1700000000,v1=abc,v1=def` into the timestamp and the v1 list.
fn parse_signature_header(header: &str) -> AppResult<(i64, Vec<String>)> {
    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = value.parse::<i64>().ok();
            }
            Some(("v1", value)) => {
                candidates.push(value.to_string());
            }
            _ => {}
        }
    }

    match (timestamp, candidates.is_empty()) {
        (Some(t), false) => Ok((t, candidates)),
        _ => Err(AppError::validation("Malformed webhook signature header")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_payment_endpoint_secret";

    fn sign(body: &[u8], timestamp: i64) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(body);
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let body = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1"}}}"#;
        let now = Utc::now();
        let header = sign(body, now.timestamp());
        assert!(verify_signature(body, &header, SECRET, 300, now).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = br#"{}"#;
        let now = Utc::now();
        let header = sign(body, now.timestamp());
        assert!(verify_signature(body, &header, "other_secret", 300, now).is_err());
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let body = br#"{}"#;
        let now = Utc::now();
        let header = sign(body, now.timestamp() - 900);
        let err = verify_signature(body, &header, SECRET, 300, now).unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_header_rejected() {
        let body = br#"{}"#;
        let now = Utc::now();
        assert!(verify_signature(body, "nonsense", SECRET, 300, now).is_err());
        assert!(verify_signature(body, "t=123", SECRET, 300, now).is_err());
    }

    #[test]
    fn test_event_parsing() {
        let body = br#"{
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_42",
                    "metadata": {"order_id": "9f6b", "user_id": "11aa"}
                }
            }
        }"#;
        let now = Utc::now();
        let header = sign(body, now.timestamp());
        let event = verify_and_parse(body, &header, SECRET, 300, now).unwrap();
        assert_eq!(event.kind, PaymentEventKind::CheckoutSessionCompleted);
        assert_eq!(event.data.object.id, "cs_test_42");
        assert_eq!(
            event.data.object.metadata.get("order_id").map(String::as_str),
            Some("9f6b")
        );
    }
}
