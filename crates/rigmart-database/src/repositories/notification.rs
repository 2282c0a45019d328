//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use rigmart_core::error::{AppError, ErrorKind};
use rigmart_core::result::AppResult;
use rigmart_entity::notification::{CreateNotification, Notification};

/// Inbox cap: list queries never return more than this many rows.
const INBOX_LIMIT: i64 = 50;

/// Repository for notification CRUD operations.
///
/// A NULL `user_id` marks a broadcast row visible to every user; list and
/// mark queries OR the two cases together.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's inbox: personal plus broadcast rows, newest-first,
    /// capped at 50.
    pub async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 OR user_id IS NULL \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(INBOX_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })
    }

    /// Count unread notifications visible to a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE (user_id = $1 OR user_id IS NULL) AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Create a notification.
    pub async fn create(&self, data: &CreateNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, type, title, message, link, icon) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.recipient.to_column())
        .bind(&data.kind)
        .bind(&data.title)
        .bind(&data.message)
        .bind(&data.link)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// Mark a personal-or-broadcast notification as read.
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND (user_id = $2 OR user_id IS NULL)",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a user's unread notifications (personal and broadcast)
    /// as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE (user_id = $1 OR user_id IS NULL) AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Delete a notification the caller owns. Broadcast rows never match;
    /// they are not individually deletable through this surface.
    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
