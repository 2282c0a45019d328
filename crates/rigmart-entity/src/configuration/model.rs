//! Saved build configuration model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Owner string used when a guest saves a configuration.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// A saved PC build from the configurator.
///
/// The owner is a plain string with no foreign key; the configurator is
/// usable by guests, who save under [`ANONYMOUS_OWNER`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Configuration {
    /// Unique configuration identifier.
    pub id: Uuid,
    /// Build name.
    pub name: String,
    /// Serialized component selection.
    pub components: serde_json::Value,
    /// Serialized notes per component.
    pub notes: Option<serde_json::Value>,
    /// Total price of the selection at save time.
    pub total_price: Decimal,
    /// Owner identifier string, `"anonymous"` for guests.
    pub user_id: String,
    /// When the configuration was saved.
    pub created_at: DateTime<Utc>,
}

/// Data required to save a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConfiguration {
    /// Build name.
    pub name: String,
    /// Serialized component selection.
    pub components: serde_json::Value,
    /// Serialized notes per component.
    pub notes: Option<serde_json::Value>,
    /// Total price of the selection.
    pub total_price: Decimal,
    /// Owner identifier string; defaults to `"anonymous"`.
    pub user_id: Option<String>,
}
