//! Checkout session types exchanged with the hosted payment provider.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One purchasable line in a checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutLineItem {
    /// Display name shown on the hosted payment page.
    pub name: String,
    /// Unit price in minor units (cents).
    pub unit_amount: i64,
    /// Quantity, at least 1.
    pub quantity: i64,
}

/// Request to open a new hosted checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    /// ISO currency code, lowercase.
    pub currency: String,
    /// Purchased lines.
    pub line_items: Vec<CheckoutLineItem>,
    /// Redirect target after successful payment.
    pub success_url: String,
    /// Redirect target when the buyer abandons the page.
    pub cancel_url: String,
    /// Opaque correlation data echoed back in webhooks and session reads.
    pub metadata: HashMap<String, String>,
}

/// A checkout session as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider-assigned session id.
    pub id: String,
    /// Hosted payment page URL, absent once the session is consumed.
    pub url: Option<String>,
    /// Session payment state as reported by the provider.
    pub payment_status: Option<String>,
    /// Correlation data supplied at creation.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Look up a metadata value by key.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
