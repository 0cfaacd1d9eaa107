//! Order database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for orders table
#[derive(Debug, Clone, FromRow)]
pub struct OrderModel {
    pub id: i64,
    pub customer_id: i64,
    pub total: Decimal,
    pub status: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub is_deleted: bool,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for order_items table
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemModel {
    pub order_id: i64,
    pub product_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Aggregated sales per product
#[derive(Debug, Clone, FromRow)]
pub struct SalesSummaryModel {
    pub product_id: i64,
    pub name: String,
    pub total_quantity_sold: i64,
    pub total_revenue: Decimal,
}
