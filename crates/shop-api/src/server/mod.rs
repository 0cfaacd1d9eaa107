//! Server setup and initialization
//!
//! Wires configuration into repositories and services, builds the router
//! and serves it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use shop_common::{AppConfig, AppError, JwtService, PasswordService};
use shop_core::SnowflakeGenerator;
use shop_db::{
    create_pool, run_migrations, PgCartRepository, PgFavoriteRepository, PgOrderRepository,
    PgProductRepository, PgUserRepository,
};
use shop_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let api = apply_middleware_with_config(
        create_router(state.config().upload.max_bytes),
        state.config(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(health.merge(api).with_state(state))
}

/// Connect to PostgreSQL, run migrations and assemble the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&shop_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.expiry_seconds,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .product_repo(Arc::new(PgProductRepository::new(pool.clone())))
        .cart_repo(Arc::new(PgCartRepository::new(pool.clone())))
        .order_repo(Arc::new(PgOrderRepository::new(pool.clone())))
        .favorite_repo(Arc::new(PgFavoriteRepository::new(pool)))
        .jwt_service(jwt_service)
        .password_service(PasswordService::new(config.password.hash_iterations))
        .snowflake_generator(snowflake_generator)
        .upload_max_bytes(config.upload.max_bytes)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve an already-bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);
    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
