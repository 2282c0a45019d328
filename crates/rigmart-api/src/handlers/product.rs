//! Catalog handlers: product browsing, search, categories, and admin CRUD.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_entity::category::{Category, CreateCategory};
use rigmart_entity::product::{CreateProduct, Product, ProductWithCategory, UpdateProduct};

use crate::dto::request::{
    CreateProductRequest, ProductListQuery, SearchQuery, UpdateProductRequest, validate,
};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Json<Vec<ProductWithCategory>>> {
    let products = state
        .catalog_service
        .list_products(&query.into_filter())
        .await?;
    Ok(Json(products))
}

/// GET /search?q=
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<PageResponse<ProductWithCategory>>> {
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        page_size: query.per_page.unwrap_or(20).clamp(1, 100),
    };
    let results = state.catalog_service.search_products(&query.q, &page).await?;
    Ok(Json(results))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    let product = state.catalog_service.get_product(id).await?;
    Ok(Json(product))
}

/// POST /products (admin)
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<Json<Product>> {
    validate(&req)?;
    let data = CreateProduct {
        name: req.name,
        description: req.description,
        price: req.price,
        image_url: req.image_url,
        stock: req.stock,
        specs: req.specs,
        category_id: req.category_id,
    };
    let product = state.catalog_service.create_product(&auth, data).await?;
    Ok(Json(product))
}

/// PUT /products/{id} (admin)
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    validate(&req)?;
    let data = UpdateProduct {
        name: req.name,
        description: req.description,
        price: req.price,
        image_url: req.image_url,
        stock: req.stock,
        specs: req.specs,
        category_id: req.category_id,
    };
    let product = state.catalog_service.update_product(&auth, id, data).await?;
    Ok(Json(product))
}

/// DELETE /products/{id} (admin)
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.catalog_service.delete_product(&auth, id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.catalog_service.list_categories().await?;
    Ok(Json(categories))
}

/// POST /categories (admin)
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(data): Json<CreateCategory>,
) -> ApiResult<Json<Category>> {
    let category = state.catalog_service.create_category(&auth, data).await?;
    Ok(Json(category))
}
