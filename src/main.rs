//! Rigmart server: PC component storefront and admin backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use rigmart_core::config::AppConfig;
use rigmart_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("RIGMART_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting rigmart v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    tracing::info!("Connecting to database...");
    let db_pool = rigmart_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    rigmart_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // Provider clients and verifiers
    let token_verifier = Arc::new(rigmart_identity::token::SessionTokenVerifier::new(
        &config.identity,
    )?);
    let route_gate = Arc::new(rigmart_identity::gate::RouteGate::new(&config.gate));
    let identity_client = Arc::new(rigmart_identity::client::IdentityProviderClient::new(
        &config.identity,
    )?);
    let checkout_gateway: Arc<dyn rigmart_payments::gateway::CheckoutGateway> = Arc::new(
        rigmart_payments::client::HostedCheckoutClient::new(&config.payments)?,
    );

    // Repositories
    let user_repo = Arc::new(rigmart_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let category_repo = Arc::new(
        rigmart_database::repositories::category::CategoryRepository::new(db_pool.clone()),
    );
    let product_repo = Arc::new(
        rigmart_database::repositories::product::ProductRepository::new(db_pool.clone()),
    );
    let cart_repo = Arc::new(rigmart_database::repositories::cart::CartRepository::new(
        db_pool.clone(),
    ));
    let order_repo = Arc::new(rigmart_database::repositories::order::OrderRepository::new(
        db_pool.clone(),
    ));
    let configuration_repo = Arc::new(
        rigmart_database::repositories::configuration::ConfigurationRepository::new(
            db_pool.clone(),
        ),
    );
    let notification_repo = Arc::new(
        rigmart_database::repositories::notification::NotificationRepository::new(db_pool.clone()),
    );

    // Services
    tracing::info!("Initializing services...");
    let identity_service = Arc::new(rigmart_service::identity::IdentityService::new(
        Arc::clone(&user_repo),
        Arc::clone(&identity_client),
    ));
    let catalog_service = Arc::new(rigmart_service::catalog::CatalogService::new(
        Arc::clone(&product_repo),
        Arc::clone(&category_repo),
    ));
    let cart_service = Arc::new(rigmart_service::cart::CartService::new(
        Arc::clone(&cart_repo),
        Arc::clone(&product_repo),
    ));
    let checkout_service = Arc::new(rigmart_service::checkout::CheckoutService::new(
        Arc::clone(&cart_repo),
        Arc::clone(&order_repo),
        Arc::clone(&checkout_gateway),
        config.payments.clone(),
    ));
    let order_service = Arc::new(rigmart_service::order::OrderService::new(
        Arc::clone(&order_repo),
        Arc::clone(&cart_repo),
    ));
    let notification_service = Arc::new(rigmart_service::notification::NotificationService::new(
        Arc::clone(&notification_repo),
    ));
    let configuration_service = Arc::new(
        rigmart_service::configuration::ConfigurationService::new(Arc::clone(&configuration_repo)),
    );
    let user_service = Arc::new(rigmart_service::user::UserService::new(Arc::clone(
        &user_repo,
    )));
    tracing::info!("Services initialized");

    // Build and start HTTP server
    let app_state = rigmart_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        token_verifier,
        route_gate,
        identity_service,
        catalog_service,
        cart_service,
        checkout_service,
        order_service,
        notification_service,
        configuration_service,
        user_service,
    };

    let app = rigmart_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Rigmart server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Rigmart server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
