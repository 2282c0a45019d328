//! Request DTOs with validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

/// Run validator rules, converting failures into a 400-kind error.
pub fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Create product request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Price in major units.
    pub price: Decimal,
    /// Image URL.
    pub image_url: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i32,
    /// Technical specifications.
    pub specs: Option<serde_json::Value>,
    /// Owning category.
    pub category_id: Uuid,
}

/// Update product request (admin). Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New stock count.
    pub stock: Option<i32>,
    /// New specifications.
    pub specs: Option<serde_json::Value>,
    /// New category.
    pub category_id: Option<Uuid>,
}

/// Catalog listing query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListQuery {
    /// Category name filter; `"all"` means no filter.
    pub category: Option<String>,
    /// Substring search over name, description, and category.
    pub search: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Page size; absent means the full set.
    pub limit: Option<u64>,
}

impl ProductListQuery {
    /// Converts to a `ProductFilter`, clamping out-of-range pagination.
    pub fn into_filter(self) -> rigmart_entity::product::ProductFilter {
        rigmart_entity::product::ProductFilter {
            category: self.category,
            search: self.search,
            page: self.page.map(|p| p.max(1)),
            limit: self.limit.map(|l| l.clamp(1, 100)),
        }
    }
}

/// Search query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search term.
    pub q: String,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub per_page: Option<u64>,
}

/// Add-to-cart request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCartItemRequest {
    /// Product to add.
    pub product_id: Uuid,
    /// Quantity, at least 1.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Cart line quantity update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    /// New quantity, at least 1.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Checkout request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Optional shipping address blob, stored on the order.
    pub shipping_address: Option<serde_json::Value>,
}

/// Admin order status update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    /// Target status: pending, paid, shipped, or cancelled.
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

/// Create notification request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Target user; absent means broadcast.
    pub user_id: Option<Uuid>,
    /// Notification type label.
    #[validate(length(min = 1, message = "Type is required"))]
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Message body.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Optional link target.
    pub link: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
}

/// Save configuration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateConfigurationRequest {
    /// Build name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Chosen components, keyed by slot.
    pub components: serde_json::Value,
    /// Free-form notes.
    pub notes: Option<serde_json::Value>,
    /// Total price of the build.
    pub total_price: Decimal,
    /// Owner id; absent or blank means anonymous.
    pub user_id: Option<String>,
}

/// Configuration listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationListQuery {
    /// Owner to list for; absent means the anonymous pool.
    pub user_id: Option<String>,
}

/// Update profile request (self).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New email.
    pub email: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// External identity provider id.
    #[validate(length(min = 1, message = "External id is required"))]
    pub external_id: String,
    /// Email.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Image URL.
    pub image_url: Option<String>,
}

/// Update user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New email.
    pub email: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New role: "user" or "admin".
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_range() {
        let ok = AddCartItemRequest {
            product_id: Uuid::new_v4(),
            quantity: 2,
        };
        assert!(validate(&ok).is_ok());

        let bad = AddCartItemRequest {
            product_id: Uuid::new_v4(),
            quantity: 0,
        };
        let err = validate(&bad).unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_catalog_query_clamps_pagination() {
        let filter = ProductListQuery {
            category: None,
            search: None,
            page: Some(0),
            limit: Some(u64::MAX),
        }
        .into_filter();
        assert_eq!(filter.page, Some(1));
        assert_eq!(filter.limit, Some(100));

        let unpaginated = ProductListQuery {
            category: None,
            search: None,
            page: None,
            limit: None,
        }
        .into_filter();
        assert_eq!(unpaginated.limit, None);
    }

    #[test]
    fn test_notification_required_fields() {
        let bad = CreateNotificationRequest {
            user_id: None,
            kind: String::new(),
            title: "t".to_string(),
            message: "m".to_string(),
            link: None,
            icon: None,
        };
        assert!(validate(&bad).is_err());
    }
}
