//! # rigmart-api
//!
//! HTTP surface of the storefront: axum router, handlers, extractors,
//! middleware, and the `AppError` to HTTP mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
