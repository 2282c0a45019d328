//! Notification inbox handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use rigmart_entity::notification::{CreateNotification, Notification, Recipient};
use rigmart_service::notification::Inbox;

use crate::dto::request::{CreateNotificationRequest, validate};
use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Inbox>> {
    let inbox = state.notification_service.inbox(&auth).await?;
    Ok(Json(inbox))
}

/// POST /notifications
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNotificationRequest>,
) -> ApiResult<Json<Notification>> {
    validate(&req)?;
    let data = CreateNotification {
        recipient: Recipient::from_column(req.user_id),
        kind: req.kind,
        title: req.title,
        message: req.message,
        link: req.link,
        icon: req.icon,
    };
    let notification = state.notification_service.create(&auth, data).await?;
    Ok(Json(notification))
}

/// PATCH /notifications/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(MessageResponse::new("Marked as read")))
}

/// POST /notifications/mark-all-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CountResponse>> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(CountResponse { count }))
}

/// DELETE /notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(MessageResponse::new("Notification deleted")))
}
