//! Route definitions
//!
//! API routes are mounted under /api; health probes stay at the root.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, cart, dashboard, favorites, health, orders, products, users};
use crate::state::AppState;

/// Create the API router (health excluded so it can skip the rate limiter)
pub fn create_router(upload_max_bytes: usize) -> Router<AppState> {
    Router::new().nest("/api", api_routes(upload_max_bytes))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .merge(user_routes())
        .merge(product_routes(upload_max_bytes))
        .merge(cart_routes())
        .merge(order_routes())
        .merge(favorite_routes())
        .route("/dashboard/seller", get(dashboard::seller_dashboard))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::register).get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

fn product_routes(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/products/upload",
            post(products::upload_products).layer(DefaultBodyLimit::max(upload_max_bytes)),
        )
        .route(
            "/products/seller/:seller_id",
            get(products::list_seller_products),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cart",
            get(cart::get_cart)
                .post(cart::add_to_cart)
                .delete(cart::clear_cart),
        )
        .route("/cart/:product_id", delete(cart::remove_from_cart))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route("/orders/user/:user_id", get(orders::list_user_orders))
        .route(
            "/orders/:id",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders/:id/status", put(orders::update_order_status))
}

fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/favorites/:product_id", delete(favorites::remove_favorite))
}
