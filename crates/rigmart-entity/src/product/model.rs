//! Product entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A PC component offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: Option<String>,
    /// Unit price in major currency units. Never negative (enforced by a
    /// CHECK constraint).
    pub price: Decimal,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Units in stock.
    pub stock: i32,
    /// Structured component attributes (socket, wattage, clock speed, ...).
    pub specs: Option<serde_json::Value>,
    /// Owning category.
    pub category_id: Uuid,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Product row joined with its category name, as returned by catalog queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductWithCategory {
    /// Unique product identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: Option<String>,
    /// Unit price in major currency units.
    pub price: Decimal,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Units in stock.
    pub stock: i32,
    /// Structured component attributes.
    pub specs: Option<serde_json::Value>,
    /// Owning category.
    pub category_id: Uuid,
    /// Category name.
    pub category_name: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Filter for catalog listing queries.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category name to match exactly; the sentinel `"all"` (or `None`)
    /// applies no category filter.
    pub category: Option<String>,
    /// Case-insensitive substring matched against name OR description OR
    /// category name.
    pub search: Option<String>,
    /// Page number (1-based). Only meaningful together with `limit`.
    pub page: Option<u64>,
    /// Page size. When absent the full filtered set is returned.
    pub limit: Option<u64>,
}

impl ProductFilter {
    /// The effective category filter, with the `"all"` sentinel removed.
    pub fn effective_category(&self) -> Option<&str> {
        match self.category.as_deref() {
            None | Some("all") => None,
            Some(name) => Some(name),
        }
    }

    /// SQL offset for the requested page, when paginated.
    pub fn offset(&self) -> Option<u64> {
        self.limit
            .map(|limit| (self.page.unwrap_or(1).max(1) - 1).saturating_mul(limit))
    }
}

/// Data required to create a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Units in stock.
    pub stock: i32,
    /// Structured component attributes.
    pub specs: Option<serde_json::Value>,
    /// Owning category.
    pub category_id: Uuid,
}

/// Data for updating an existing product. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New stock count.
    pub stock: Option<i32>,
    /// New component attributes.
    pub specs: Option<serde_json::Value>,
    /// New owning category.
    pub category_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_disables_category_filter() {
        let filter = ProductFilter {
            category: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.effective_category(), None);

        let filter = ProductFilter {
            category: Some("GPU".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.effective_category(), Some("GPU"));
    }

    #[test]
    fn test_pagination_offset() {
        let filter = ProductFilter {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(filter.offset(), Some(5));

        let unpaginated = ProductFilter::default();
        assert_eq!(unpaginated.offset(), None);
    }

    #[test]
    fn test_pagination_offset_saturates() {
        let filter = ProductFilter {
            page: Some(u64::MAX),
            limit: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(filter.offset(), Some(u64::MAX));
    }
}
