//! Route-gate middleware: rejects unauthenticated requests to protected
//! paths before they reach a handler.
//!
//! Only the token signature and claims are checked here; handlers that
//! need the caller's identity run the full `AuthUser` extractor, which
//! also reconciles the local user row.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use rigmart_core::error::AppError;
use rigmart_identity::gate::Access;

use crate::error::ApiError;
use crate::state::AppState;

/// Enforce the public/protected classification of the request path.
pub async fn enforce_route_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.route_gate.classify(request.uri().path()) == Access::Protected {
        let token = request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let Some(token) = token else {
            return ApiError(AppError::unauthenticated("Missing Authorization header"))
                .into_response();
        };
        if let Err(e) = state.token_verifier.verify(token) {
            return ApiError(e).into_response();
        }
    }

    next.run(request).await
}
