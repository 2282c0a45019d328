//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use rigmart_core::config::AppConfig;
use rigmart_identity::gate::RouteGate;
use rigmart_identity::token::SessionTokenVerifier;
use rigmart_service::cart::CartService;
use rigmart_service::catalog::CatalogService;
use rigmart_service::checkout::CheckoutService;
use rigmart_service::configuration::ConfigurationService;
use rigmart_service::identity::IdentityService;
use rigmart_service::notification::NotificationService;
use rigmart_service::order::OrderService;
use rigmart_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// Session-token verifier.
    pub token_verifier: Arc<SessionTokenVerifier>,
    /// Public/protected route classifier.
    pub route_gate: Arc<RouteGate>,

    /// Identity sync service.
    pub identity_service: Arc<IdentityService>,
    /// Product catalog service.
    pub catalog_service: Arc<CatalogService>,
    /// Cart service.
    pub cart_service: Arc<CartService>,
    /// Checkout and payment service.
    pub checkout_service: Arc<CheckoutService>,
    /// Order service.
    pub order_service: Arc<OrderService>,
    /// Notification inbox service.
    pub notification_service: Arc<NotificationService>,
    /// Saved configuration service.
    pub configuration_service: Arc<ConfigurationService>,
    /// User profile and admin service.
    pub user_service: Arc<UserService>,
}
