//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::recipient::Recipient;

/// A notification delivered to a user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient user. NULL means broadcast, visible to all users.
    pub user_id: Option<Uuid>,
    /// Notification type (e.g. `"order"`, `"promo"`, `"system"`).
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Optional link target.
    pub link: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The recipient as a tagged variant.
    pub fn recipient(&self) -> Recipient {
        Recipient::from_column(self.user_id)
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// Recipient.
    pub recipient: Recipient,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Optional link target.
    pub link: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
}
