//! External payment provider configuration.

use serde::{Deserialize, Serialize};

/// Settings for the hosted-checkout payment provider integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    /// Base URL of the provider's API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Secret API key.
    pub secret_key: String,
    /// Shared secret for payment webhook signature verification.
    pub webhook_secret: String,
    /// Browser redirect target after a successful payment.
    pub success_url: String,
    /// Browser redirect target after a cancelled payment.
    pub cancel_url: String,
    /// ISO 4217 currency code for checkout sessions.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Allowed clock skew for webhook timestamps, in seconds.
    #[serde(default = "default_timestamp_tolerance")]
    pub webhook_tolerance_seconds: i64,
}

fn default_api_base() -> String {
    "https://api.payments.example.com/v1".to_string()
}

fn default_currency() -> String {
    "eur".to_string()
}

fn default_timestamp_tolerance() -> i64 {
    300
}
