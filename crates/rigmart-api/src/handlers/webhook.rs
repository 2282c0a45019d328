//! Inbound webhook handlers for the identity and payment providers.
//!
//! Both handlers take the raw body, verify the provider's signature before
//! touching any data, and dispatch the parsed event to the owning service.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;

use rigmart_core::error::AppError;
use rigmart_identity::webhook::WebhookHeaders;

use crate::dto::response::WebhookAck;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /webhooks/identity-provider
pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let webhook_headers = WebhookHeaders {
        id: header(&headers, "webhook-id")?,
        timestamp: header(&headers, "webhook-timestamp")?,
        signature: header(&headers, "webhook-signature")?,
    };

    let identity = &state.config.identity;
    let event = rigmart_identity::webhook::verify_and_parse(
        &body,
        &webhook_headers,
        &identity.webhook_secret,
        identity.webhook_tolerance_seconds,
        Utc::now(),
    )?;

    state.identity_service.handle_event(event).await?;
    Ok(Json(WebhookAck::ok()))
}

/// POST /webhooks/payment-provider
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let signature = header(&headers, "payment-signature")?;

    let payments = &state.config.payments;
    let event = rigmart_payments::webhook::verify_and_parse(
        &body,
        &signature,
        &payments.webhook_secret,
        payments.webhook_tolerance_seconds,
        Utc::now(),
    )?;

    state.checkout_service.handle_event(event).await?;
    Ok(Json(WebhookAck::ok()))
}

fn header(headers: &HeaderMap, name: &str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .ok_or_else(|| AppError::validation(format!("Missing {name} header")))
}
