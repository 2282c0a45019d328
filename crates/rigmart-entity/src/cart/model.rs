//! Cart entity models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's single active cart. Created lazily on first add.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: Uuid,
    /// Owning user. One active cart per user (UNIQUE constraint).
    pub user_id: Uuid,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

/// A line item in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Owning cart.
    pub cart_id: Uuid,
    /// Referenced product.
    pub product_id: Uuid,
    /// Quantity, always >= 1.
    pub quantity: i32,
}

/// Cart line item joined with current product data.
///
/// Prices here are *current* product prices; cart totals are always
/// recomputed on read and never snapshotted before checkout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemDetail {
    /// Unique item identifier.
    pub id: Uuid,
    /// Referenced product.
    pub product_id: Uuid,
    /// Product name.
    pub product_name: String,
    /// Product image URL.
    pub image_url: Option<String>,
    /// Current unit price.
    pub unit_price: Decimal,
    /// Quantity.
    pub quantity: i32,
}

impl CartItemDetail {
    /// Line subtotal at current prices.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart with its items and recomputed total, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    /// Cart identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Line items with current product data.
    pub items: Vec<CartItemDetail>,
    /// Σ quantity × current unit price across all items.
    pub total: Decimal,
}

impl CartView {
    /// Build a view from a cart row and its joined items, recomputing the
    /// total from current prices.
    pub fn assemble(cart: Cart, items: Vec<CartItemDetail>) -> Self {
        let total = items.iter().map(CartItemDetail::subtotal).sum();
        Self {
            id: cart.id,
            user_id: cart.user_id,
            items,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: Decimal, quantity: i32) -> CartItemDetail {
        CartItemDetail {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: "test".to_string(),
            image_url: None,
            unit_price: price,
            quantity,
        }
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let cart = Cart {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let view = CartView::assemble(
            cart,
            vec![item(Decimal::new(1000, 2), 2), item(Decimal::new(2500, 2), 1)],
        );
        assert_eq!(view.total, Decimal::new(4500, 2));
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let view = CartView::assemble(cart, vec![]);
        assert_eq!(view.total, Decimal::ZERO);
    }
}
