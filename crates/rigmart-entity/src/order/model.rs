//! Order entity models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::OrderStatus;

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Owning user. NULL when the user account was deleted; orders
    /// outlive their owner for bookkeeping.
    pub user_id: Option<Uuid>,
    /// Order total, re-derived from item subtotals at creation time.
    pub total: Decimal,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Payment session identifier at the external provider.
    pub payment_session_id: Option<String>,
    /// Shipping address as structured JSON.
    pub shipping_address: Option<serde_json::Value>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item of an order.
///
/// `unit_price` is snapshotted at order time and immutable afterwards;
/// later catalog price changes never affect placed orders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Owning order.
    pub order_id: Uuid,
    /// Referenced product.
    pub product_id: Uuid,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price snapshot at order time.
    pub unit_price: Decimal,
}

impl OrderItem {
    /// Line subtotal at the snapshotted price.
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order with its line items, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    /// The order row.
    #[serde(flatten)]
    pub order: Order,
    /// Snapshotted line items.
    pub items: Vec<OrderItem>,
}

/// Re-derive an order total from its item rows.
///
/// Client-supplied totals are never trusted; this is the single source of
/// truth for what an order is worth.
pub fn derive_total(items: &[OrderItem]) -> Decimal {
    items.iter().map(OrderItem::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_item(unit_price: Decimal, quantity: i32) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_derive_total() {
        let items = vec![
            order_item(Decimal::new(1000, 2), 2),
            order_item(Decimal::new(2500, 2), 1),
        ];
        assert_eq!(derive_total(&items), Decimal::new(4500, 2));
    }

    #[test]
    fn test_derive_total_empty() {
        assert_eq!(derive_total(&[]), Decimal::ZERO);
    }
}
