//! Notification inbox operations.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_database::repositories::notification::NotificationRepository;
use rigmart_entity::notification::{CreateNotification, Notification};

use crate::context::RequestContext;

/// A user's inbox: recent notifications plus the unread count.
#[derive(Debug, Clone, Serialize)]
pub struct Inbox {
    /// Personal and broadcast notifications, newest first, capped.
    pub notifications: Vec<Notification>,
    /// Unread count across both kinds.
    pub unread_count: i64,
}

/// Manages the per-user notification inbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Fetch the caller's inbox.
    pub async fn inbox(&self, ctx: &RequestContext) -> AppResult<Inbox> {
        let notifications = self.notif_repo.find_for_user(ctx.user_id).await?;
        let unread_count = self.notif_repo.count_unread(ctx.user_id).await?;
        Ok(Inbox {
            notifications,
            unread_count,
        })
    }

    /// Create a notification. Broadcasts require the admin role; a
    /// non-admin may only address a personal notification to themselves.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateNotification,
    ) -> AppResult<Notification> {
        if !ctx.is_admin() {
            if data.recipient.is_broadcast() {
                return Err(AppError::forbidden("Broadcasts require the admin role"));
            }
            if !data.recipient.is_owned_by(ctx.user_id) {
                return Err(AppError::forbidden(
                    "Cannot create notifications for other users",
                ));
            }
        }
        validate_fields(&data)?;

        let notification = self.notif_repo.create(&data).await?;
        info!(
            notification_id = %notification.id,
            broadcast = data.recipient.is_broadcast(),
            "Notification created"
        );
        Ok(notification)
    }

    /// Mark one notification as read. Covers both the caller's personal
    /// rows and broadcast rows.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.notif_repo.mark_read(id, ctx.user_id).await? {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        Ok(())
    }

    /// Mark every visible unread notification as read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }

    /// Delete one of the caller's personal notifications. Broadcast rows
    /// cannot be deleted this way.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        if !self.notif_repo.delete_owned(id, ctx.user_id).await? {
            return Err(AppError::not_found(format!("Notification {id} not found")));
        }
        Ok(())
    }
}

fn validate_fields(data: &CreateNotification) -> AppResult<()> {
    if data.title.trim().is_empty() {
        return Err(AppError::validation("Notification title must not be empty"));
    }
    if data.message.trim().is_empty() {
        return Err(AppError::validation("Notification message must not be empty"));
    }
    if data.kind.trim().is_empty() {
        return Err(AppError::validation("Notification type must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmart_entity::notification::Recipient;

    fn base() -> CreateNotification {
        CreateNotification {
            recipient: Recipient::Broadcast,
            kind: "promo".to_string(),
            title: "Summer sale".to_string(),
            message: "GPUs 10% off this week".to_string(),
            link: None,
            icon: None,
        }
    }

    #[test]
    fn test_valid_fields() {
        assert!(validate_fields(&base()).is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut n = base();
        n.title = "  ".to_string();
        assert!(validate_fields(&n).is_err());

        let mut n = base();
        n.message = String::new();
        assert!(validate_fields(&n).is_err());

        let mut n = base();
        n.kind = String::new();
        assert!(validate_fields(&n).is_err());
    }
}
