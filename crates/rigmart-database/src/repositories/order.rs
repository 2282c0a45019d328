//! Order repository implementation.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use rigmart_core::error::{AppError, ErrorKind};
use rigmart_core::result::AppResult;
use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_entity::order::{Order, OrderItem, OrderStatus};

/// A line to snapshot into a new order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// Referenced product.
    pub product_id: Uuid,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Decimal,
}

/// Repository for orders and their snapshotted items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order and its items in one transaction.
    ///
    /// The total is derived from the items inside this call; callers never
    /// supply it. Either the order and every item land, or nothing does.
    pub async fn create_with_items(
        &self,
        user_id: Uuid,
        items: &[NewOrderItem],
        shipping_address: Option<&serde_json::Value>,
    ) -> AppResult<(Order, Vec<OrderItem>)> {
        let total: Decimal = items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, total, shipping_address) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(total)
        .bind(shipping_address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create order", e))?;

        let mut order_items = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItem>(
                "INSERT INTO order_items (order_id, product_id, quantity, unit_price) \
                 VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create order item", e)
            })?;
            order_items.push(row);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit order", e)
        })?;

        Ok((order, order_items))
    }

    /// Find an order by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    /// Find an order by primary key, scoped to its owner.
    pub async fn find_by_id_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    /// List a user's orders, newest-first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Order>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count orders", e))?;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list orders", e))?;

        Ok(PageResponse::new(
            orders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List all orders, newest-first (admin surface).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Order>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count orders", e))?;

        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list orders", e))?;

        Ok(PageResponse::new(
            orders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List an order's snapshotted items.
    pub async fn items(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list order items", e)
            })
    }

    /// Record the payment session id handed back by the provider.
    pub async fn set_payment_session(&self, order_id: Uuid, session_id: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE orders SET payment_session_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(order_id)
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record payment session", e)
        })?;
        Ok(())
    }

    /// Mark the order bound to a payment session as paid.
    ///
    /// Returns the order when one matched; unknown sessions yield `None`
    /// (the payment webhook ignores them).
    pub async fn mark_paid_by_session(&self, session_id: &str) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = 'paid', updated_at = NOW() \
             WHERE payment_session_id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark order paid", e))
    }

    /// Update an order's status.
    pub async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(order_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
    }
}
