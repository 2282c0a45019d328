//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product category (CPU, GPU, RAM, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Unique category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Data required to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Unique category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}
