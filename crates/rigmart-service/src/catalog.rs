//! Product catalog: browsing, search, and admin CRUD.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_database::repositories::category::CategoryRepository;
use rigmart_database::repositories::product::ProductRepository;
use rigmart_entity::category::{Category, CreateCategory};
use rigmart_entity::product::{
    CreateProduct, Product, ProductFilter, ProductWithCategory, UpdateProduct,
};

use crate::context::RequestContext;

/// Manages the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    product_repo: Arc<ProductRepository>,
    category_repo: Arc<CategoryRepository>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(product_repo: Arc<ProductRepository>, category_repo: Arc<CategoryRepository>) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    /// List products with optional category, search, and pagination
    /// filters. Newest first.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> AppResult<Vec<ProductWithCategory>> {
        self.product_repo.list(filter).await
    }

    /// Full-text-ish search over product name, description, and category
    /// name, ordered by product name.
    pub async fn search_products(
        &self,
        term: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ProductWithCategory>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }
        self.product_repo.search(term, page).await
    }

    /// Fetch a single product with its category name.
    pub async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// List all categories, name ascending.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.category_repo.find_all().await
    }

    /// Create a product. Admin only.
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        data: CreateProduct,
    ) -> AppResult<Product> {
        require_admin(ctx)?;
        validate_product_fields(&data.name, Some(data.price), Some(data.stock))?;
        self.require_category(data.category_id).await?;

        let product = self.product_repo.create(&data).await?;
        info!(product_id = %product.id, admin = %ctx.user_id, "Product created");
        Ok(product)
    }

    /// Update a product. Admin only.
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateProduct,
    ) -> AppResult<Product> {
        require_admin(ctx)?;
        if let Some(name) = &data.name {
            validate_product_fields(name, data.price, data.stock)?;
        } else {
            validate_price_and_stock(data.price, data.stock)?;
        }
        if let Some(category_id) = data.category_id {
            self.require_category(category_id).await?;
        }

        let product = self.product_repo.update(id, &data).await?;
        info!(product_id = %product.id, admin = %ctx.user_id, "Product updated");
        Ok(product)
    }

    /// Delete a product. Admin only.
    pub async fn delete_product(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(ctx)?;

        if !self.product_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Product {id} not found")));
        }
        info!(product_id = %id, admin = %ctx.user_id, "Product deleted");
        Ok(())
    }

    /// Create a category. Admin only.
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        data: CreateCategory,
    ) -> AppResult<Category> {
        require_admin(ctx)?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Category name must not be empty"));
        }
        self.category_repo.create(&data).await
    }

    async fn require_category(&self, category_id: Uuid) -> AppResult<()> {
        if self.category_repo.find_by_id(category_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Category {category_id} does not exist"
            )));
        }
        Ok(())
    }
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin role required"))
    }
}

fn validate_product_fields(
    name: &str,
    price: Option<rust_decimal::Decimal>,
    stock: Option<i32>,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Product name must not be empty"));
    }
    validate_price_and_stock(price, stock)
}

fn validate_price_and_stock(
    price: Option<rust_decimal::Decimal>,
    stock: Option<i32>,
) -> AppResult<()> {
    if let Some(price) = price {
        if price < rust_decimal::Decimal::ZERO {
            return Err(AppError::validation("Price must not be negative"));
        }
    }
    if let Some(stock) = stock {
        if stock < 0 {
            return Err(AppError::validation("Stock must not be negative"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmart_entity::user::UserRole;
    use rust_decimal::Decimal;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "ext_test".to_string(), role)
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&ctx(UserRole::Admin)).is_ok());
        let err = require_admin(&ctx(UserRole::User)).unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::Forbidden);
    }

    #[test]
    fn test_product_field_validation() {
        assert!(validate_product_fields("GPU", Some(Decimal::new(49999, 2)), Some(3)).is_ok());
        assert!(validate_product_fields("  ", Some(Decimal::ONE), Some(1)).is_err());
        assert!(validate_product_fields("GPU", Some(Decimal::NEGATIVE_ONE), Some(1)).is_err());
        assert!(validate_product_fields("GPU", Some(Decimal::ONE), Some(-2)).is_err());
        assert!(validate_price_and_stock(None, None).is_ok());
    }
}
