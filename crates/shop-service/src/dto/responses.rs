//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility and
//! money as decimal strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use shop_core::entities::{OrderStatus, ShippingAddress, UserRole};

use crate::services::error::FieldErrors;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user representation. Password material is never included.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Product Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SellerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub url_image: String,
    pub seller_id: String,
    /// Populated on public reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerResponse>,
    pub is_active: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a soft delete
#[derive(Debug, Clone, Serialize)]
pub struct ProductDeletedResponse {
    pub message: String,
    pub product: ProductResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvRowError {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CsvUploadResponse {
    pub created: usize,
    pub errors: Vec<CsvRowError>,
}

// ============================================================================
// Cart Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
    /// `None` when the product has since been removed
    pub product: Option<ProductResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<CartItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Order Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDeletedResponse {
    pub message: String,
    pub order: OrderResponse,
}

// ============================================================================
// Favorite Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteResponse {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
    pub product: Option<ProductResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteCreatedResponse {
    pub message: String,
    pub favorite: FavoriteResponse,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSellerResponse {
    pub id: String,
    pub name: String,
    pub total_quantity_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    pub total_products_registered: i64,
    pub total_revenue: Decimal,
    pub total_products_sold: i64,
    pub best_selling_product: Option<BestSellerResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
