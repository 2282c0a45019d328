//! Request context carrying the authenticated, locally-synced user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rigmart_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the authentication extractor after the session token is
/// verified and the user row is reconciled, then passed into service
/// methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Local user id.
    pub user_id: Uuid,
    /// External id from the identity provider.
    pub external_id: String,
    /// The user's role at reconciliation time.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, external_id: String, role: UserRole) -> Self {
        Self {
            user_id,
            external_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}
