//! Product repository implementation.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use rigmart_core::error::{AppError, ErrorKind};
use rigmart_core::result::AppResult;
use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_entity::product::{
    CreateProduct, Product, ProductFilter, ProductWithCategory, UpdateProduct,
};

const SELECT_WITH_CATEGORY: &str = "SELECT p.id, p.name, p.description, p.price, p.image_url, \
     p.stock, p.specs, p.category_id, c.name AS category_name, p.created_at, p.updated_at \
     FROM products p JOIN categories c ON c.id = p.category_id";

/// Repository for catalog queries and admin product CRUD.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    /// List products matching the filter, newest-first.
    ///
    /// Category matches by name equality (the `"all"` sentinel applies no
    /// filter); search is a case-insensitive substring over name OR
    /// description OR category name. Without a limit the full filtered set
    /// is returned.
    pub async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<ProductWithCategory>> {
        let mut query = QueryBuilder::<Postgres>::new(SELECT_WITH_CATEGORY);
        push_filter(&mut query, filter);
        query.push(" ORDER BY p.created_at DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit as i64);
            query.push(" OFFSET ");
            query.push_bind(filter.offset().unwrap_or(0) as i64);
        }

        query
            .build_query_as::<ProductWithCategory>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))
    }

    /// Search products by term, name-ascending.
    ///
    /// The search endpoint orders by name instead of recency, unlike the
    /// catalog listing.
    pub async fn search(
        &self,
        term: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ProductWithCategory>> {
        let pattern = format!("%{term}%");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products p JOIN categories c ON c.id = p.category_id \
             WHERE p.name ILIKE $1 OR p.description ILIKE $1 OR c.name ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count search results", e)
        })?;

        let sql = format!(
            "{SELECT_WITH_CATEGORY} \
             WHERE p.name ILIKE $1 OR p.description ILIKE $1 OR c.name ILIKE $1 \
             ORDER BY p.name ASC LIMIT $2 OFFSET $3"
        );
        let products = sqlx::query_as::<_, ProductWithCategory>(&sql)
            .bind(&pattern)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search products", e)
            })?;

        Ok(PageResponse::new(
            products,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new product.
    pub async fn create(&self, data: &CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, image_url, stock, specs, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_url)
        .bind(data.stock)
        .bind(&data.specs)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation(format!("Category {} does not exist", data.category_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create product", e),
        })
    }

    /// Update a product's fields.
    pub async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = COALESCE($2, name), \
                                 description = COALESCE($3, description), \
                                 price = COALESCE($4, price), \
                                 image_url = COALESCE($5, image_url), \
                                 stock = COALESCE($6, stock), \
                                 specs = COALESCE($7, specs), \
                                 category_id = COALESCE($8, category_id), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_url)
        .bind(data.stock)
        .bind(&data.specs)
        .bind(data.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Delete a product by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete product", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Append the shared WHERE clause for category/search filters.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut has_where = false;

    if let Some(category) = filter.effective_category() {
        query.push(" WHERE c.name = ");
        query.push_bind(category.to_string());
        has_where = true;
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{search}%");
        query.push(if has_where { " AND (" } else { " WHERE (" });
        query.push("p.name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR p.description ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR c.name ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
