//! `AuthUser` extractor: verifies the Bearer session token and resolves
//! the local user, lazy-syncing from the identity provider on first sight.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use rigmart_core::error::AppError;
use rigmart_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.token_verifier.verify(token)?;

        // Resolve or lazily create the local user row.
        let user = state.identity_service.sync_user(&claims.sub).await?;

        let ctx = RequestContext::new(user.id, user.external_id, user.role);
        Ok(AuthUser(ctx))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format").into())
}
