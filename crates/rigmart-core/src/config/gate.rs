//! Route gate configuration.

use serde::{Deserialize, Serialize};

/// Public/protected path prefixes for the request-level auth gate.
///
/// A path matching both lists is treated as public; the public list
/// takes precedence. Paths matching neither list are protected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Path prefixes that bypass authentication.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Path prefixes that require authentication.
    #[serde(default = "default_protected_paths")]
    pub protected_paths: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_paths: default_public_paths(),
            protected_paths: default_protected_paths(),
        }
    }
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/health".to_string(),
        "/products".to_string(),
        "/categories".to_string(),
        "/search".to_string(),
        "/configurations".to_string(),
        "/webhooks".to_string(),
    ]
}

fn default_protected_paths() -> Vec<String> {
    vec![
        "/cart".to_string(),
        "/checkout".to_string(),
        "/orders".to_string(),
        "/notifications".to_string(),
        "/user".to_string(),
        "/users".to_string(),
        "/sync-user".to_string(),
    ]
}
