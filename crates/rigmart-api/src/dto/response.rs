//! Response DTOs.
//!
//! Success bodies are plain JSON; entities serialize directly and these
//! wrappers cover the few non-entity shapes.

use serde::{Deserialize, Serialize};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Count response, used by mark-all-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Affected row count.
    pub count: u64,
}

/// Webhook acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always true; the provider only needs a 2xx.
    pub received: bool,
}

impl WebhookAck {
    /// Creates an acknowledgement.
    pub fn ok() -> Self {
        Self { received: true }
    }
}
