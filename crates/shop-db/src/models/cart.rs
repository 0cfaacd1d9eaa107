//! Cart database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for carts table
#[derive(Debug, Clone, FromRow)]
pub struct CartModel {
    pub id: i64,
    pub customer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for cart_items table
#[derive(Debug, Clone, FromRow)]
pub struct CartItemModel {
    pub product_id: i64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}
