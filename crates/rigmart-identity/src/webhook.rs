//! Identity webhook signature verification and event parsing.
//!
//! The provider signs each delivery with a timestamped HMAC: the signed
//! content is `"{id}.{timestamp}.{body}"`, the secret is base64 behind a
//! `whsec_` prefix, and the signature header carries one or more
//! space-separated `v1,<base64>` candidates. Verification is a pure
//! function over the raw body and the three headers, with no transport
//! involved, so it is unit-testable offline.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// The three signature headers every delivery must carry.
#[derive(Debug, Clone)]
pub struct WebhookHeaders {
    /// Unique message id.
    pub id: String,
    /// Unix-seconds timestamp of the delivery.
    pub timestamp: String,
    /// Space-separated `v1,<base64>` signature candidates.
    pub signature: String,
}

/// Kinds of user lifecycle events the provider emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityEventKind {
    /// A user signed up.
    #[serde(rename = "user.created")]
    UserCreated,
    /// A user changed their profile.
    #[serde(rename = "user.updated")]
    UserUpdated,
    /// A user deleted their account.
    #[serde(rename = "user.deleted")]
    UserDeleted,
}

/// The profile payload attached to a user event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityEventUser {
    /// External user id.
    pub id: String,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Profile image URL.
    pub image_url: Option<String>,
}

/// A verified, parsed identity event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityEvent {
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: IdentityEventKind,
    /// Event payload.
    pub data: IdentityEventUser,
}

/// Verify a delivery's signature and parse the event.
///
/// Rejects with a `Validation` error (HTTP 400) before any data mutation
/// when the signature is wrong, the timestamp is outside the tolerance
/// window, or the body is not a known event.
pub fn verify_and_parse(
    raw_body: &[u8],
    headers: &WebhookHeaders,
    secret: &str,
    tolerance_seconds: i64,
    now: DateTime<Utc>,
) -> AppResult<IdentityEvent> {
    verify_signature(raw_body, headers, secret, tolerance_seconds, now)?;

    serde_json::from_slice(raw_body)
        .map_err(|e| AppError::validation(format!("Malformed identity event payload: {e}")))
}

/// Verify the timestamped HMAC signature of a delivery.
pub fn verify_signature(
    raw_body: &[u8],
    headers: &WebhookHeaders,
    secret: &str,
    tolerance_seconds: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let timestamp: i64 = headers
        .timestamp
        .parse()
        .map_err(|_| AppError::validation("Invalid webhook timestamp"))?;

    let skew = (now.timestamp() - timestamp).abs();
    if skew > tolerance_seconds {
        return Err(AppError::validation("Webhook timestamp outside tolerance"));
    }

    let key = decode_secret(secret)?;
    let mut signed_content =
        Vec::with_capacity(headers.id.len() + headers.timestamp.len() + raw_body.len() + 2);
    signed_content.extend_from_slice(headers.id.as_bytes());
    signed_content.push(b'.');
    signed_content.extend_from_slice(headers.timestamp.as_bytes());
    signed_content.push(b'.');
    signed_content.extend_from_slice(raw_body);

    for candidate in headers.signature.split_whitespace() {
        let Some(encoded) = candidate.strip_prefix("v1,") else {
            continue;
        };
        let Ok(candidate_bytes) = BASE64.decode(encoded) else {
            continue;
        };

        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| AppError::internal(format!("HMAC key error: {e}")))?;
        mac.update(&signed_content);
        if mac.verify_slice(&candidate_bytes).is_ok() {
            return Ok(());
        }
    }

    Err(AppError::validation("Webhook signature mismatch"))
}

/// Decode the shared secret, tolerating the provider's `whsec_` prefix.
fn decode_secret(secret: &str) -> AppResult<Vec<u8>> {
    let trimmed = secret.strip_prefix("whsec_").unwrap_or(secret);
    BASE64
        .decode(trimmed)
        .map_err(|e| AppError::configuration(format!("Invalid webhook secret: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    fn sign(body: &[u8], id: &str, timestamp: &str) -> String {
        let key = decode_secret(SECRET).unwrap();
        let mut mac = HmacSha256::new_from_slice(&key).unwrap();
        mac.update(format!("{id}.{timestamp}.").as_bytes());
        mac.update(body);
        format!("v1,{}", BASE64.encode(mac.finalize().into_bytes()))
    }

    fn headers_for(body: &[u8], now: DateTime<Utc>) -> WebhookHeaders {
        let timestamp = now.timestamp().to_string();
        WebhookHeaders {
            id: "msg_27UH4WbU".to_string(),
            signature: sign(body, "msg_27UH4WbU", &timestamp),
            timestamp,
        }
    }

    #[test]
    fn test_valid_signature_accepted() {
        let body = br#"{"type":"user.created","data":{"id":"ext_1"}}"#;
        let now = Utc::now();
        let headers = headers_for(body, now);
        assert!(verify_signature(body, &headers, SECRET, 300, now).is_ok());
    }

    #[test]
    fn test_tampered_body_rejected() {
        let body = br#"{"type":"user.created","data":{"id":"ext_1"}}"#;
        let now = Utc::now();
        let headers = headers_for(body, now);
        let tampered = br#"{"type":"user.deleted","data":{"id":"ext_1"}}"#;
        let err = verify_signature(tampered, &headers, SECRET, 300, now).unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let body = br#"{}"#;
        let now = Utc::now();
        let stale = now - chrono::Duration::seconds(600);
        let headers = headers_for(body, stale);
        let err = verify_signature(body, &headers, SECRET, 300, now).unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let body = br#"{}"#;
        let now = Utc::now();
        let mut headers = headers_for(body, now);
        headers.signature = headers.signature.replace("v1,", "v2,");
        assert!(verify_signature(body, &headers, SECRET, 300, now).is_err());
    }

    #[test]
    fn test_event_parsing() {
        let body = br#"{
            "type": "user.updated",
            "data": {
                "id": "ext_42",
                "email": "jo@example.com",
                "first_name": "Jo",
                "last_name": null,
                "image_url": null
            }
        }"#;
        let now = Utc::now();
        let headers = headers_for(body, now);
        let event = verify_and_parse(body, &headers, SECRET, 300, now).unwrap();
        assert_eq!(event.kind, IdentityEventKind::UserUpdated);
        assert_eq!(event.data.id, "ext_42");
        assert_eq!(event.data.email.as_deref(), Some("jo@example.com"));
    }
}
