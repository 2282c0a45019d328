//! User profile reads and the admin user surface.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_core::types::pagination::{PageRequest, PageResponse};
use rigmart_database::repositories::user::UserRepository;
use rigmart_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Manages user profiles and admin user administration.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Fetch the caller's own profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Update the caller's own profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        data: UpdateUser,
    ) -> AppResult<User> {
        self.user_repo.update(ctx.user_id, &data).await
    }

    /// List all users. Admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        require_admin(ctx)?;
        self.user_repo.find_all(page).await
    }

    /// Fetch any user by id. Admin only.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
        require_admin(ctx)?;
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Create a user row directly. Admin only; normally rows arrive through
    /// identity sync, this exists for seeding and support.
    pub async fn create(&self, ctx: &RequestContext, data: CreateUser) -> AppResult<User> {
        require_admin(ctx)?;
        if data.external_id.trim().is_empty() {
            return Err(AppError::validation("External id must not be empty"));
        }
        let user = self.user_repo.create(&data).await?;
        info!(user_id = %user.id, admin = %ctx.user_id, "User created by admin");
        Ok(user)
    }

    /// Update a user's profile fields and, optionally, their role.
    /// Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateUser,
        role: Option<UserRole>,
    ) -> AppResult<User> {
        require_admin(ctx)?;

        let mut user = self.user_repo.update(id, &data).await?;
        if let Some(role) = role {
            if role != user.role {
                user = self.user_repo.update_role(id, role).await?;
                info!(user_id = %id, new_role = %role, admin = %ctx.user_id, "User role changed");
            }
        }
        Ok(user)
    }
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin role required"))
    }
}
