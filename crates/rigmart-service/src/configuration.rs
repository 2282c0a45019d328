//! Saved PC build configurations.
//!
//! Configurations are owned by a free-form string id: either an external
//! user id or the shared `"anonymous"` owner for signed-out builders.

use std::sync::Arc;

use uuid::Uuid;

use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_database::repositories::configuration::ConfigurationRepository;
use rigmart_entity::configuration::{Configuration, CreateConfiguration, ANONYMOUS_OWNER};

/// Manages saved build configurations.
#[derive(Debug, Clone)]
pub struct ConfigurationService {
    config_repo: Arc<ConfigurationRepository>,
}

impl ConfigurationService {
    /// Creates a new configuration service.
    pub fn new(config_repo: Arc<ConfigurationRepository>) -> Self {
        Self { config_repo }
    }

    /// List an owner's saved configurations, newest first. A missing owner
    /// means the anonymous pool.
    pub async fn list(&self, owner: Option<&str>) -> AppResult<Vec<Configuration>> {
        let owner = normalize_owner(owner);
        self.config_repo.find_by_owner(owner).await
    }

    /// Save a configuration.
    pub async fn create(&self, data: CreateConfiguration) -> AppResult<Configuration> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Configuration name must not be empty"));
        }
        if !data.components.is_object() {
            return Err(AppError::validation("Components must be an object"));
        }
        self.config_repo.create(&data).await
    }

    /// Delete a configuration, scoped to its owner.
    pub async fn delete(&self, id: Uuid, owner: Option<&str>) -> AppResult<()> {
        let owner = normalize_owner(owner);
        if !self.config_repo.delete(id, owner).await? {
            return Err(AppError::not_found(format!("Configuration {id} not found")));
        }
        Ok(())
    }
}

fn normalize_owner(owner: Option<&str>) -> &str {
    match owner {
        Some(o) if !o.trim().is_empty() => o,
        _ => ANONYMOUS_OWNER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_normalization() {
        assert_eq!(normalize_owner(Some("ext_1")), "ext_1");
        assert_eq!(normalize_owner(Some("")), ANONYMOUS_OWNER);
        assert_eq!(normalize_owner(Some("   ")), ANONYMOUS_OWNER);
        assert_eq!(normalize_owner(None), ANONYMOUS_OWNER);
    }
}
