//! HTTP implementation of the checkout gateway.

use async_trait::async_trait;

use rigmart_core::config::payments::PaymentsConfig;
use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;

use crate::gateway::CheckoutGateway;
use crate::session::{CheckoutSession, CreateSessionRequest};

/// Client for the provider's checkout session API.
#[derive(Debug, Clone)]
pub struct HostedCheckoutClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl HostedCheckoutClient {
    /// Build a client from the payments configuration.
    pub fn new(config: &PaymentsConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build payments HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    async fn read_session(response: reqwest::Response) -> AppResult<CheckoutSession> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "Payment provider rejected request");
            return Err(AppError::upstream(format!(
                "Payment provider returned {status}"
            )));
        }
        response.json::<CheckoutSession>().await.map_err(|e| {
            AppError::upstream(format!("Malformed payment provider response: {e}"))
        })
    }
}

#[async_trait]
impl CheckoutGateway for HostedCheckoutClient {
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
        idempotency_key: &str,
    ) -> AppResult<CheckoutSession> {
        let url = format!("{}/checkout/sessions", self.api_base);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", idempotency_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::upstream(format!("Payment provider request failed: {e}"))
            })?;

        Self::read_session(response).await
    }

    async fn fetch_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let url = format!("{}/checkout/sessions/{}", self.api_base, session_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                AppError::upstream(format!("Payment provider request failed: {e}"))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!(
                "Checkout session {session_id} not found"
            )));
        }

        Self::read_session(response).await
    }
}
