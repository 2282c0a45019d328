//! Order handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use rigmart_core::types::pagination::PageResponse;
use rigmart_entity::order::{Order, OrderStatus, OrderView};

use crate::dto::request::{UpdateOrderRequest, validate};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /orders
///
/// Admins see every order; everyone else sees their own.
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<Order>>> {
    let page = params.into_page_request();
    let orders = if auth.is_admin() {
        state.order_service.list_all(&auth, &page).await?
    } else {
        state.order_service.list_own(&auth, &page).await?
    };
    Ok(Json(orders))
}

/// POST /orders
///
/// Creates a pending order directly from the caller's cart, bypassing the
/// hosted payment flow.
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<crate::dto::request::CheckoutRequest>,
) -> ApiResult<Json<OrderView>> {
    let order = state
        .order_service
        .create_from_cart(&auth, req.shipping_address)
        .await?;
    Ok(Json(order))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OrderView>> {
    let order = state.order_service.get(&auth, id).await?;
    Ok(Json(order))
}

/// PUT /orders/{id} (admin)
pub async fn update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderRequest>,
) -> ApiResult<Json<Order>> {
    validate(&req)?;
    let status = OrderStatus::from_str(&req.status)?;
    let order = state.order_service.update_status(&auth, id, status).await?;
    Ok(Json(order))
}

/// GET /orders/by-session/{session_id}
///
/// Post-redirect resolution: maps a checkout session back to the caller's
/// order, settling it if the provider already reports payment.
pub async fn get_order_by_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state.checkout_service.confirm(&auth, &session_id).await?;
    Ok(Json(order))
}
