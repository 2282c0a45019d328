//! Order history and admin order management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_database::repositories::cart::CartRepository;
use rigmart_database::repositories::order::{NewOrderItem, OrderRepository};
use rigmart_entity::order::{Order, OrderStatus, OrderView};

use crate::context::RequestContext;

/// Manages order reads and status transitions.
#[derive(Debug, Clone)]
pub struct OrderService {
    order_repo: Arc<OrderRepository>,
    cart_repo: Arc<CartRepository>,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(order_repo: Arc<OrderRepository>, cart_repo: Arc<CartRepository>) -> Self {
        Self {
            order_repo,
            cart_repo,
        }
    }

    /// Create a pending order directly from the caller's cart, without a
    /// payment session. The cart is cleared once the order exists.
    pub async fn create_from_cart(
        &self,
        ctx: &RequestContext,
        shipping_address: Option<serde_json::Value>,
    ) -> AppResult<OrderView> {
        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        let items = self.cart_repo.items(cart.id).await?;
        if items.is_empty() {
            return Err(AppError::validation("Cannot order an empty cart"));
        }

        let snapshot: Vec<NewOrderItem> = items
            .iter()
            .map(|i| NewOrderItem {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect();
        let (order, order_items) = self
            .order_repo
            .create_with_items(ctx.user_id, &snapshot, shipping_address.as_ref())
            .await?;

        self.cart_repo.clear(cart.id).await?;
        info!(order_id = %order.id, user_id = %ctx.user_id, "Order created from cart");

        Ok(OrderView {
            order,
            items: order_items,
        })
    }

    /// List the caller's orders, newest first.
    pub async fn list_own(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        self.order_repo.find_by_user(ctx.user_id, page).await
    }

    /// Fetch one of the caller's orders with its items. Admins may read
    /// any order.
    pub async fn get(&self, ctx: &RequestContext, order_id: Uuid) -> AppResult<OrderView> {
        let order = if ctx.is_admin() {
            self.order_repo.find_by_id(order_id).await?
        } else {
            self.order_repo
                .find_by_id_for_user(order_id, ctx.user_id)
                .await?
        };
        let order =
            order.ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        let items = self.order_repo.items(order.id).await?;
        Ok(OrderView { order, items })
    }

    /// List every order. Admin only.
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin role required"));
        }
        self.order_repo.find_all(page).await
    }

    /// Move an order to a new status. Admin only.
    ///
    /// Allowed transitions: pending to paid or cancelled, paid to shipped
    /// or cancelled. Shipped and cancelled are terminal.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        order_id: Uuid,
        status: OrderStatus,
    ) -> AppResult<Order> {
        if !ctx.is_admin() {
            return Err(AppError::forbidden("Admin role required"));
        }

        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if !transition_allowed(order.status, status) {
            return Err(AppError::validation(format!(
                "Cannot move order from {} to {}",
                order.status, status
            )));
        }

        let updated = self.order_repo.update_status(order_id, status).await?;
        info!(order_id = %order_id, from = %order.status, to = %status, "Order status changed");
        Ok(updated)
    }
}

/// Whether a status change is a legal forward step.
fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Paid) | (Pending, Cancelled) | (Paid, Shipped) | (Paid, Cancelled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(transition_allowed(OrderStatus::Pending, OrderStatus::Paid));
        assert!(transition_allowed(OrderStatus::Pending, OrderStatus::Cancelled));
        assert!(transition_allowed(OrderStatus::Paid, OrderStatus::Shipped));
        assert!(transition_allowed(OrderStatus::Paid, OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!transition_allowed(OrderStatus::Shipped, OrderStatus::Paid));
        assert!(!transition_allowed(OrderStatus::Cancelled, OrderStatus::Pending));
        assert!(!transition_allowed(OrderStatus::Shipped, OrderStatus::Cancelled));
    }

    #[test]
    fn test_no_self_or_backward_moves() {
        assert!(!transition_allowed(OrderStatus::Pending, OrderStatus::Pending));
        assert!(!transition_allowed(OrderStatus::Paid, OrderStatus::Pending));
        assert!(!transition_allowed(OrderStatus::Pending, OrderStatus::Shipped));
    }
}
