//! External identity provider configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external identity provider integration.
///
/// The provider issues RS256 session tokens and signs user lifecycle
/// webhooks with a shared secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Expected `iss` claim of session tokens.
    pub issuer: String,
    /// PEM-encoded RSA public key used to verify session tokens.
    pub public_key_pem: String,
    /// Shared secret for webhook signature verification.
    pub webhook_secret: String,
    /// Base URL of the provider's backend API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Secret API key for the provider's backend API.
    pub api_key: String,
    /// Allowed clock skew for webhook timestamps, in seconds.
    #[serde(default = "default_timestamp_tolerance")]
    pub webhook_tolerance_seconds: i64,
}

fn default_api_base() -> String {
    "https://api.identity.example.com/v1".to_string()
}

fn default_timestamp_tolerance() -> i64 {
    300
}
