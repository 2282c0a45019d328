//! Saved configuration repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use rigmart_core::error::{AppError, ErrorKind};
use rigmart_core::result::AppResult;
use rigmart_entity::configuration::{ANONYMOUS_OWNER, Configuration, CreateConfiguration};

/// Repository for saved configurator builds.
#[derive(Debug, Clone)]
pub struct ConfigurationRepository {
    pool: PgPool,
}

impl ConfigurationRepository {
    /// Create a new configuration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List configurations saved under an owner string, newest-first.
    pub async fn find_by_owner(&self, owner: &str) -> AppResult<Vec<Configuration>> {
        sqlx::query_as::<_, Configuration>(
            "SELECT * FROM configurations WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list configurations", e)
        })
    }

    /// Save a configuration.
    pub async fn create(&self, data: &CreateConfiguration) -> AppResult<Configuration> {
        let owner = data.user_id.as_deref().unwrap_or(ANONYMOUS_OWNER);
        sqlx::query_as::<_, Configuration>(
            "INSERT INTO configurations (name, components, notes, total_price, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.components)
        .bind(&data.notes)
        .bind(data.total_price)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save configuration", e)
        })
    }

    /// Delete a configuration owned by the given owner string.
    pub async fn delete(&self, id: Uuid, owner: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM configurations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete configuration", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
