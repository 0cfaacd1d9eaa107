//! Test fixtures and data generators
//!
//! Request bodies and the subset of each response the tests inspect.

use std::sync::atomic::{AtomicU64, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for emails; the process id keeps parallel runs apart
pub fn unique_suffix() -> String {
    format!("{}-{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterRequest {
    pub fn customer() -> Self {
        Self::unique("Cliente")
    }

    pub fn seller() -> Self {
        Self::unique("Vendedor")
    }

    fn unique(role: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test {role}"),
            email: format!("test{suffix}@example.com"),
            password: "secret123".to_string(),
            role: role.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub url_image: String,
}

impl CreateProductRequest {
    pub fn priced(name: &str, cents: i64) -> Self {
        Self {
            name: name.to_string(),
            price: Decimal::new(cents, 2),
            description: format!("{name} for tests"),
            url_image: "https://img.example.com/product.png".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub seller_id: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CsvRowError {
    pub row: u64,
    pub errors: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct CsvUploadResponse {
    pub created: u64,
    pub errors: Vec<CsvRowError>,
}

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest {
    pub shipping_address: ShippingAddress,
}

impl Default for CreateOrderRequest {
    fn default() -> Self {
        Self {
            shipping_address: ShippingAddress {
                street: "Rua das Flores, 10".to_string(),
                city: "Recife".to_string(),
                postal_code: "50000-000".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
    pub status: String,
}

// ============================================================================
// Favorites and dashboard
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AddFavoriteRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    pub total_products_registered: i64,
    pub total_revenue: Decimal,
    pub total_products_sold: i64,
    pub best_selling_product: Option<serde_json::Value>,
}
