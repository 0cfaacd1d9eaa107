//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations are applied on startup)
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use shop_common::JwtService;
use shop_core::UserRole;

/// Register an account and log in with it
async fn sign_up(server: &TestServer, request: &RegisterRequest) -> (UserResponse, String) {
    let response = server.post("/api/users", request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/login", &LoginRequest::from_register(request))
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    (user, token.token)
}

async fn create_product(server: &TestServer, token: &str, name: &str, cents: i64) -> ProductResponse {
    let response = server
        .post_auth("/api/products", token, &CreateProductRequest::priced(name, cents))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_to_cart(server: &TestServer, token: &str, product_id: &str, quantity: i32) -> reqwest::Response {
    server
        .post_auth(
            "/api/cart",
            token,
            &AddToCartRequest {
                product_id: product_id.to_string(),
                quantity,
            },
        )
        .await
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Users and auth
// ============================================================================

#[tokio::test]
async fn test_duplicate_email_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::customer();
    let (_, token) = sign_up(&server, &request).await;

    // Same address in a different case
    let mut again = RegisterRequest::seller();
    again.email = request.email.to_uppercase();
    let response = server.post("/api/users", &again).await.unwrap();
    let body = assert_error(response, StatusCode::BAD_REQUEST, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
    assert_eq!(body["error"]["message"], "Email already in use");

    let response = server.get_auth("/api/users", &token).await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.iter().filter(|u| u.email == request.email).count(), 1);
}

#[tokio::test]
async fn test_register_requires_role() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({"name": "Ana", "email": "ana-no-role@example.com", "password": "secret123"});
    let response = server.post("/api/users", &body).await.unwrap();
    let body = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert!(body["error"]["details"]["role"].is_string());
}

#[tokio::test]
async fn test_login_token_carries_id_and_role() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, token) = sign_up(&server, &RegisterRequest::seller()).await;

    let jwt = JwtService::new(&server.config.jwt.secret, server.config.jwt.expiry_seconds);
    let claims = jwt.decode_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, UserRole::Vendedor);
}

#[tokio::test]
async fn test_login_failures() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::customer();
    let (user, token) = sign_up(&server, &request).await;

    let wrong = LoginRequest {
        email: request.email.clone(),
        password: "wrong-password".to_string(),
    };
    let response = server.post("/api/login", &wrong).await.unwrap();
    let body = assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
    assert_eq!(body["error"]["message"], "Invalid credentials");

    // Once deactivated, login is forbidden whatever the password
    let response = server
        .delete_auth(&format!("/api/users/{}", user.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post("/api/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ACCOUNT_DISABLED").await.unwrap();
    let response = server.post("/api/login", &wrong).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ACCOUNT_DISABLED").await.unwrap();

    // The old token stops working too
    let response = server.get_auth("/api/cart", &token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_missing_or_bad_authorization() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/cart").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
        .await
        .unwrap();

    let response = server.get_auth("/api/cart", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_users_only_modify_themselves() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice, alice_token) = sign_up(&server, &RegisterRequest::customer()).await;
    let (bob, _) = sign_up(&server, &RegisterRequest::customer()).await;

    let response = server
        .patch_auth(&format!("/api/users/{}", bob.id), &alice_token, &json!({"name": "Hacked"}))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await.unwrap();

    let response = server
        .patch_auth(&format!("/api/users/{}", alice.id), &alice_token, &json!({"name": "Alice"}))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.role, "Cliente");

    let response = server.get_auth("/api/users/abc", &alice_token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_product_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seller, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (_, customer_token) = sign_up(&server, &RegisterRequest::customer()).await;

    let response = server
        .post_auth("/api/products", &customer_token, &CreateProductRequest::priced("Mug", 1000))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_SELLER").await.unwrap();

    let product = create_product(&server, &seller_token, "Mug", 1000).await;
    assert_eq!(product.seller_id, seller.id);
    assert_eq!(product.price, Decimal::new(1000, 2));

    let response = server.get(&format!("/api/products/{}", product.id)).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["seller"]["id"], seller.id);

    let response = server
        .get(&format!("/api/products/seller/{}", seller.id))
        .await
        .unwrap();
    let listed: Vec<ProductResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);

    let response = server
        .patch_auth(
            &format!("/api/products/{}", product.id),
            &seller_token,
            &json!({"price": "-1"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/products/{}", product.id), &seller_token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["product"]["is_active"], false);

    let response = server.get(&format!("/api/products/{}", product.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_csv_upload() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seller, token) = sign_up(&server, &RegisterRequest::seller()).await;

    let csv = "name,price,description,url_image\n\
               Mug,10.50,Blue mug,https://img.example.com/mug.png\n\
               Plate,abc,White plate,https://img.example.com/plate.png\n\
               Bowl,7,Deep bowl,https://img.example.com/bowl.png\n";
    let response = server.upload_csv(&token, "products-csv", csv).await.unwrap();
    let result: CsvUploadResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(result.created, 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 2);
    assert!(result.errors[0].errors.contains_key("price"));

    let response = server
        .get(&format!("/api/products/seller/{}", seller.id))
        .await
        .unwrap();
    let listed: Vec<ProductResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 2);

    let response = server.upload_csv(&token, "file", csv).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Cart and orders
// ============================================================================

#[tokio::test]
async fn test_cart_accumulates_and_rejects_underflow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (_, token) = sign_up(&server, &RegisterRequest::customer()).await;
    let product = create_product(&server, &seller_token, "Mug", 1000).await;

    add_to_cart(&server, &token, &product.id, 2).await;
    let response = add_to_cart(&server, &token, &product.id, 3).await;
    let cart: CartResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);

    let response = add_to_cart(&server, &token, &product.id, -5).await;
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get_auth("/api/cart", &token).await.unwrap();
    let cart: CartResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cart.items[0].quantity, 5);

    let response = server
        .delete_auth(&format!("/api/cart/{}", product.id), &token)
        .await
        .unwrap();
    let cart: CartResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(cart.items.is_empty());

    let response = server
        .delete_auth(&format!("/api/cart/{}", product.id), &token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "NOT_IN_CART").await.unwrap();
}

#[tokio::test]
async fn test_order_snapshots_cart() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (customer, token) = sign_up(&server, &RegisterRequest::customer()).await;
    let mug = create_product(&server, &seller_token, "Mug", 1000).await;
    let plate = create_product(&server, &seller_token, "Plate", 250).await;

    let response = server
        .post_auth("/api/orders", &token, &CreateOrderRequest::default())
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "EMPTY_CART").await.unwrap();

    add_to_cart(&server, &token, &mug.id, 2).await;
    add_to_cart(&server, &token, &plate.id, 4).await;

    let response = server
        .post_auth("/api/orders", &token, &CreateOrderRequest::default())
        .await
        .unwrap();
    let order: OrderResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(order.total, Decimal::new(3000, 2));
    assert_eq!(order.status, "Pendente");
    assert_eq!(order.items.len(), 2);

    let response = server.get_auth("/api/cart", &token).await.unwrap();
    let cart: CartResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(cart.items.is_empty());

    // Repricing the product leaves the order untouched
    let response = server
        .patch_auth(&format!("/api/products/{}", mug.id), &seller_token, &json!({"price": "99.00"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/orders/{}", order.id), &token)
        .await
        .unwrap();
    let stored: OrderResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stored.total, Decimal::new(3000, 2));

    let response = server
        .get_auth(&format!("/api/orders/user/{}", customer.id), &token)
        .await
        .unwrap();
    let mine: Vec<OrderResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);

    let response = server
        .put_auth(
            &format!("/api/orders/{}/status", order.id),
            &token,
            &UpdateOrderStatusRequest { status: "Voando".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/orders/{}/status", order.id),
            &seller_token,
            &UpdateOrderStatusRequest { status: "Enviado".to_string() },
        )
        .await
        .unwrap();
    let shipped: OrderResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(shipped.status, "Enviado");

    let response = server
        .delete_auth(&format!("/api/orders/{}", order.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/orders", &token).await.unwrap();
    let remaining: Vec<OrderResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(remaining.is_empty());
}

// ============================================================================
// Account deactivation
// ============================================================================

#[tokio::test]
async fn test_deactivation_cascades_for_sellers_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seller, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (_, other_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (customer, customer_token) = sign_up(&server, &RegisterRequest::customer()).await;
    let product = create_product(&server, &seller_token, "Mug", 1000).await;
    let kept = create_product(&server, &other_token, "Plate", 500).await;

    let response = server
        .delete_auth(&format!("/api/users/{}", customer.id), &customer_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get(&format!("/api/products/{}", kept.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/users/{}", seller.id), &seller_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/products/{}", product.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.get(&format!("/api/products/{}", kept.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/users/{}", seller.id), &other_token)
        .await
        .unwrap();
    let stored: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!stored.is_active);
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_favorites_conflict_and_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (_, token) = sign_up(&server, &RegisterRequest::customer()).await;
    let product = create_product(&server, &seller_token, "Mug", 1000).await;
    let request = AddFavoriteRequest {
        product_id: product.id.clone(),
    };

    let response = server.post_auth("/api/favorites", &token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth("/api/favorites", &token, &request).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "FAVORITE_ALREADY_EXISTS")
        .await
        .unwrap();

    let response = server.get_auth("/api/favorites", &token).await.unwrap();
    let favorites: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["product"]["name"], "Mug");

    let path = format!("/api/favorites/{}", product.id);
    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_FAVORITE")
        .await
        .unwrap();
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_seller_dashboard() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, seller_token) = sign_up(&server, &RegisterRequest::seller()).await;
    let (_, token) = sign_up(&server, &RegisterRequest::customer()).await;
    let mug = create_product(&server, &seller_token, "Mug", 1000).await;
    create_product(&server, &seller_token, "Plate", 500).await;

    add_to_cart(&server, &token, &mug.id, 3).await;
    let response = server
        .post_auth("/api/orders", &token, &CreateOrderRequest::default())
        .await
        .unwrap();
    let order: OrderResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Pending orders are not sales yet
    let response = server.get_auth("/api/dashboard/seller", &seller_token).await.unwrap();
    let dash: DashboardResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dash.total_products_registered, 2);
    assert_eq!(dash.total_products_sold, 0);
    assert!(dash.best_selling_product.is_none());

    let response = server
        .put_auth(
            &format!("/api/orders/{}/status", order.id),
            &token,
            &UpdateOrderStatusRequest { status: "Pago".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/dashboard/seller", &seller_token).await.unwrap();
    let dash: DashboardResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dash.total_products_sold, 3);
    assert_eq!(dash.total_revenue, Decimal::new(3000, 2));
    assert_eq!(dash.best_selling_product.unwrap()["id"], mug.id);

    let response = server.get_auth("/api/dashboard/seller", &token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_SELLER").await.unwrap();
}
