//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user, mirrored from the external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Identifier assigned by the external identity provider. Unique;
    /// the idempotency anchor for both sync paths.
    pub external_id: String,
    /// Email address.
    pub email: Option<String>,
    /// First name from the external profile.
    pub first_name: Option<String>,
    /// Last name from the external profile.
    pub last_name: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Profile image URL.
    pub image_url: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user from an external profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// External identity provider ID.
    pub external_id: String,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Profile image URL.
    pub image_url: Option<String>,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New email address.
    pub email: Option<String>,
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New profile image URL.
    pub image_url: Option<String>,
}
