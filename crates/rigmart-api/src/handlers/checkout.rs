//! Checkout handlers.

use axum::Json;
use axum::extract::State;

use rigmart_service::checkout::CheckoutStart;

use crate::dto::request::CheckoutRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /checkout
pub async fn start_checkout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<Json<CheckoutStart>> {
    let start = state
        .checkout_service
        .start(&auth, req.shipping_address)
        .await?;
    Ok(Json(start))
}
