//! User reconciliation against the external identity provider.
//!
//! Two paths keep the local `users` table in step with the provider:
//! webhook events pushed by the provider, and lazy sync on the first
//! authenticated request from an external id with no local row. Both are
//! idempotent around the unique `external_id` column.

use std::sync::Arc;

use tracing::{info, warn};

use rigmart_core::error::ErrorKind;
use rigmart_core::result::AppResult;
use rigmart_database::repositories::user::UserRepository;
use rigmart_entity::user::{CreateUser, UpdateUser, User};
use rigmart_identity::client::IdentityProviderClient;
use rigmart_identity::webhook::{IdentityEvent, IdentityEventKind, IdentityEventUser};

/// Keeps local user rows in sync with the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityService {
    user_repo: Arc<UserRepository>,
    provider: Arc<IdentityProviderClient>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(user_repo: Arc<UserRepository>, provider: Arc<IdentityProviderClient>) -> Self {
        Self {
            user_repo,
            provider,
        }
    }

    /// Resolve the local user for a verified external id, creating the row
    /// from the provider's profile when it does not exist yet.
    ///
    /// Safe under concurrent first requests: a create that loses the race
    /// hits the unique constraint and falls back to re-reading the row the
    /// winner inserted.
    pub async fn sync_user(&self, external_id: &str) -> AppResult<User> {
        if let Some(user) = self.user_repo.find_by_external_id(external_id).await? {
            return Ok(user);
        }

        let profile = self.provider.fetch_profile(external_id).await?;
        let data = CreateUser {
            external_id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            image_url: profile.image_url,
        };

        match self.user_repo.create(&data).await {
            Ok(user) => {
                info!(external_id, user_id = %user.id, "Synced new user from provider");
                Ok(user)
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                // Another request inserted the same external id first.
                let existing = self.user_repo.find_by_external_id(external_id).await?;
                existing.ok_or(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a verified webhook event to the local user table.
    pub async fn handle_event(&self, event: IdentityEvent) -> AppResult<()> {
        match event.kind {
            IdentityEventKind::UserCreated => self.apply_created(event.data).await,
            IdentityEventKind::UserUpdated => self.apply_updated(event.data).await,
            IdentityEventKind::UserDeleted => self.apply_deleted(&event.data.id).await,
        }
    }

    async fn apply_created(&self, data: IdentityEventUser) -> AppResult<()> {
        let external_id = data.id.clone();
        let create = CreateUser {
            external_id: data.id,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            image_url: data.image_url,
        };

        match self.user_repo.create(&create).await {
            Ok(user) => {
                info!(%external_id, user_id = %user.id, "Created user from webhook");
                Ok(())
            }
            Err(e) if e.kind == ErrorKind::Conflict => {
                // Redelivery, or lazy sync got there first.
                info!(%external_id, "User already exists, webhook create is a no-op");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn apply_updated(&self, data: IdentityEventUser) -> AppResult<()> {
        let update = UpdateUser {
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            image_url: data.image_url,
        };

        match self
            .user_repo
            .update_by_external_id(&data.id, &update)
            .await?
        {
            Some(user) => {
                info!(external_id = %data.id, user_id = %user.id, "Updated user from webhook");
            }
            None => {
                warn!(external_id = %data.id, "Update event for unknown user, ignoring");
            }
        }
        Ok(())
    }

    async fn apply_deleted(&self, external_id: &str) -> AppResult<()> {
        if self.user_repo.delete_by_external_id(external_id).await? {
            info!(external_id, "Deleted user from webhook");
        } else {
            warn!(external_id, "Delete event for unknown user, ignoring");
        }
        Ok(())
    }
}
