//! The checkout gateway seam.

use async_trait::async_trait;

use rigmart_core::result::AppResult;

use crate::session::{CheckoutSession, CreateSessionRequest};

/// Abstraction over the hosted payment provider.
///
/// The service layer depends on this trait so checkout logic can be
/// exercised in tests without touching the network.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Open a new checkout session.
    ///
    /// `idempotency_key` deduplicates retries of the same logical
    /// checkout on the provider side.
    async fn create_session(
        &self,
        request: &CreateSessionRequest,
        idempotency_key: &str,
    ) -> AppResult<CheckoutSession>;

    /// Read back an existing session by id.
    async fn fetch_session(&self, session_id: &str) -> AppResult<CheckoutSession>;
}
