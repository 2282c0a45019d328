//! User profile, identity sync, and admin user handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use rigmart_core::types::pagination::PageResponse;
use rigmart_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::dto::request::{
    CreateUserRequest, UpdateProfileRequest, UpdateUserRequest, validate,
};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /sync-user
///
/// Explicit reconciliation trigger: the extractor already performed the
/// sync, so the handler just returns the resolved row.
pub async fn sync_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<User>> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(user))
}

/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<User>> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(user))
}

/// POST /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let data = UpdateUser {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        image_url: req.image_url,
    };
    let user = state.user_service.update_profile(&auth, data).await?;
    Ok(Json(user))
}

/// GET /users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<Json<PageResponse<User>>> {
    let users = state
        .user_service
        .list(&auth, &params.into_page_request())
        .await?;
    Ok(Json(users))
}

/// POST /users (admin)
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    validate(&req)?;
    let data = CreateUser {
        external_id: req.external_id,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        image_url: req.image_url,
    };
    let user = state.user_service.create(&auth, data).await?;
    Ok(Json(user))
}

/// GET /users/{id} (admin)
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get(&auth, id).await?;
    Ok(Json(user))
}

/// PUT /users/{id} (admin)
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    let role = match &req.role {
        Some(r) => Some(UserRole::from_str(r)?),
        None => None,
    };
    let data = UpdateUser {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        image_url: req.image_url,
    };
    let user = state.user_service.update(&auth, id, data, role).await?;
    Ok(Json(user))
}
