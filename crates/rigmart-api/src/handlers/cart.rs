//! Cart handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use rigmart_entity::cart::CartView;

use crate::dto::request::{AddCartItemRequest, UpdateCartItemRequest, validate};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /cart
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartView>> {
    let cart = state.cart_service.get_cart(&auth).await?;
    Ok(Json(cart))
}

/// POST /cart/items
pub async fn add_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddCartItemRequest>,
) -> ApiResult<Json<CartView>> {
    validate(&req)?;
    let cart = state
        .cart_service
        .add_item(&auth, req.product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// PATCH /cart/items/{product_id}
pub async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(req): Json<UpdateCartItemRequest>,
) -> ApiResult<Json<CartView>> {
    validate(&req)?;
    let cart = state
        .cart_service
        .set_quantity(&auth, product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /cart/items/{product_id}
pub async fn remove_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<CartView>> {
    let cart = state.cart_service.remove_item(&auth, product_id).await?;
    Ok(Json(cart))
}

/// DELETE /cart
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartView>> {
    let cart = state.cart_service.clear(&auth).await?;
    Ok(Json(cart))
}
