//! Route definitions for the HTTP API.
//!
//! Routes are organized by domain and merged into one router. The router
//! receives `AppState` and passes it to all handlers via axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;

    let routes = Router::new()
        .merge(catalog_routes())
        .merge(cart_routes())
        .merge(checkout_routes())
        .merge(order_routes())
        .merge(notification_routes())
        .merge(configuration_routes())
        .merge(user_routes())
        .merge(webhook_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    routes
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::enforce_route_gate,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Product browsing, search, and admin CRUD
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::product::list_products))
        .route("/products", post(handlers::product::create_product))
        .route("/products/{id}", get(handlers::product::get_product))
        .route("/products/{id}", put(handlers::product::update_product))
        .route("/products/{id}", delete(handlers::product::delete_product))
        .route("/search", get(handlers::product::search_products))
        .route("/categories", get(handlers::product::list_categories))
        .route("/categories", post(handlers::product::create_category))
}

/// Cart endpoints
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(handlers::cart::get_cart))
        .route("/cart", delete(handlers::cart::clear_cart))
        .route("/cart/items", post(handlers::cart::add_item))
        .route(
            "/cart/items/{product_id}",
            patch(handlers::cart::update_item),
        )
        .route(
            "/cart/items/{product_id}",
            delete(handlers::cart::remove_item),
        )
}

/// Checkout endpoint
fn checkout_routes() -> Router<AppState> {
    Router::new().route("/checkout", post(handlers::checkout::start_checkout))
}

/// Order endpoints
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::order::list_orders))
        .route("/orders", post(handlers::order::create_order))
        .route(
            "/orders/by-session/{session_id}",
            get(handlers::order::get_order_by_session),
        )
        .route("/orders/{id}", get(handlers::order::get_order))
        .route("/orders/{id}", put(handlers::order::update_order))
}

/// Notification inbox endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications",
            post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/mark-all-read",
            post(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            patch(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

/// Saved configuration endpoints (public)
fn configuration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/configurations",
            get(handlers::configuration::list_configurations),
        )
        .route(
            "/configurations",
            post(handlers::configuration::create_configuration),
        )
        .route(
            "/configurations/{id}",
            delete(handlers::configuration::delete_configuration),
        )
}

/// Profile, sync, and admin user endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/sync-user", post(handlers::user::sync_user))
        .route("/user/profile", get(handlers::user::get_profile))
        .route("/user/profile", post(handlers::user::update_profile))
        .route("/users", get(handlers::user::list_users))
        .route("/users", post(handlers::user::create_user))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
}

/// Inbound provider webhooks (signature-verified, no session auth)
fn webhook_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/webhooks/identity-provider",
            post(handlers::webhook::identity_webhook),
        )
        .route(
            "/webhooks/payment-provider",
            post(handlers::webhook::payment_webhook),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(
        cors_config.max_age_seconds,
    ))
}
