//! Shopping cart operations.
//!
//! Carts are created lazily on first access; every user has at most one.

use std::sync::Arc;

use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_database::repositories::cart::CartRepository;
use rigmart_database::repositories::product::ProductRepository;
use rigmart_entity::cart::CartView;

use crate::context::RequestContext;

/// Manages the per-user shopping cart.
#[derive(Debug, Clone)]
pub struct CartService {
    cart_repo: Arc<CartRepository>,
    product_repo: Arc<ProductRepository>,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(cart_repo: Arc<CartRepository>, product_repo: Arc<ProductRepository>) -> Self {
        Self {
            cart_repo,
            product_repo,
        }
    }

    /// Fetch the caller's cart with item details and total, creating the
    /// cart row if this is their first visit.
    pub async fn get_cart(&self, ctx: &RequestContext) -> AppResult<CartView> {
        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        let items = self.cart_repo.items(cart.id).await?;
        Ok(CartView::assemble(cart, items))
    }

    /// Add a product to the cart. Adding a product already present adds
    /// the quantities together.
    pub async fn add_item(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        quantity: i32,
    ) -> AppResult<CartView> {
        validate_quantity(quantity)?;

        // Reject unknown products with 404 before touching the cart.
        if self.product_repo.find_by_id(product_id).await?.is_none() {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }

        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        self.cart_repo.add_item(cart.id, product_id, quantity).await?;

        let items = self.cart_repo.items(cart.id).await?;
        Ok(CartView::assemble(cart, items))
    }

    /// Replace the quantity of a cart line.
    pub async fn set_quantity(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        quantity: i32,
    ) -> AppResult<CartView> {
        validate_quantity(quantity)?;

        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        if !self.cart_repo.set_quantity(cart.id, product_id, quantity).await? {
            return Err(AppError::not_found(format!(
                "Product {product_id} is not in the cart"
            )));
        }

        let items = self.cart_repo.items(cart.id).await?;
        Ok(CartView::assemble(cart, items))
    }

    /// Remove a product from the cart.
    pub async fn remove_item(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
    ) -> AppResult<CartView> {
        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        if !self.cart_repo.remove_item(cart.id, product_id).await? {
            return Err(AppError::not_found(format!(
                "Product {product_id} is not in the cart"
            )));
        }

        let items = self.cart_repo.items(cart.id).await?;
        Ok(CartView::assemble(cart, items))
    }

    /// Remove every line from the cart.
    pub async fn clear(&self, ctx: &RequestContext) -> AppResult<CartView> {
        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        self.cart_repo.clear(cart.id).await?;

        let items = self.cart_repo.items(cart.id).await?;
        Ok(CartView::assemble(cart, items))
    }
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_validation() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
