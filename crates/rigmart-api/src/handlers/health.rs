//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    rigmart_database::connection::health_check(&state.db_pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
