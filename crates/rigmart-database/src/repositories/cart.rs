//! Cart repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use rigmart_core::error::{AppError, ErrorKind};
use rigmart_core::result::AppResult;
use rigmart_entity::cart::{Cart, CartItemDetail};

/// Repository for the per-user active cart and its line items.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's active cart.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Cart>> {
        sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cart", e))
    }

    /// Get a user's active cart, creating it on first touch.
    ///
    /// `ON CONFLICT DO NOTHING` plus re-read keeps concurrent first-adds
    /// from double-inserting; the UNIQUE(user_id) constraint is the lock.
    pub async fn find_or_create(&self, user_id: Uuid) -> AppResult<Cart> {
        if let Some(cart) = self.find_by_user(user_id).await? {
            return Ok(cart);
        }

        let inserted = sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING \
             RETURNING *",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create cart", e))?;

        match inserted {
            Some(cart) => Ok(cart),
            None => self
                .find_by_user(user_id)
                .await?
                .ok_or_else(|| AppError::database("Cart vanished after concurrent insert")),
        }
    }

    /// List a cart's items joined with current product data.
    pub async fn items(&self, cart_id: Uuid) -> AppResult<Vec<CartItemDetail>> {
        sqlx::query_as::<_, CartItemDetail>(
            "SELECT ci.id, ci.product_id, p.name AS product_name, p.image_url, \
                    p.price AS unit_price, ci.quantity \
             FROM cart_items ci JOIN products p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.id",
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cart items", e))
    }

    /// Add a product to a cart, incrementing the quantity if it is already
    /// present.
    pub async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3) \
             ON CONFLICT (cart_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Product {product_id} not found"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add cart item", e),
        })?;
        Ok(())
    }

    /// Set the quantity of an existing line item. Last write wins on
    /// concurrent updates (no version field by design).
    pub async fn set_quantity(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND product_id = $2")
                .bind(cart_id)
                .bind(product_id)
                .bind(quantity)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update quantity", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a product from a cart.
    pub async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
                .bind(cart_id)
                .bind(product_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove cart item", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove all items from a cart.
    pub async fn clear(&self, cart_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear cart", e))?;
        Ok(result.rows_affected())
    }
}
