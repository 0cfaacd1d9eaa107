//! Product database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for products table
#[derive(Debug, Clone, FromRow)]
pub struct ProductModel {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub url_image: String,
    pub seller_id: i64,
    pub is_active: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product row joined with the public columns of its seller
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithSellerModel {
    #[sqlx(flatten)]
    pub product: ProductModel,
    pub seller_name: String,
    pub seller_email: String,
}
