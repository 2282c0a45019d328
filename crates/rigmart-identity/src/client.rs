//! Backend API client for the identity provider.
//!
//! Used when a verified session token arrives for an external id that has
//! no local row yet: the full profile is fetched server-to-server and
//! mirrored into `users`.

use serde::Deserialize;

use rigmart_core::config::identity::IdentityConfig;
use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

/// A user profile as served by the provider's backend API.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalProfile {
    /// External user id.
    pub id: String,
    /// Email address.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Profile image URL.
    pub image_url: Option<String>,
}

/// HTTP client for the provider's backend API.
#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl IdentityProviderClient {
    /// Build a client from the identity configuration.
    pub fn new(config: &IdentityConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build identity HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch a user's full profile by external id.
    pub async fn fetch_profile(&self, external_id: &str) -> AppResult<ExternalProfile> {
        let url = format!("{}/users/{}", self.api_base, external_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::upstream(format!("Identity provider request failed: {e}"))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!(
                "Identity provider has no user {external_id}"
            )));
        }
        if !status.is_success() {
            return Err(AppError::upstream(format!(
                "Identity provider returned {status} for {external_id}"
            )));
        }

        response.json::<ExternalProfile>().await.map_err(|e| {
            AppError::upstream(format!("Malformed identity provider profile: {e}"))
        })
    }
}
