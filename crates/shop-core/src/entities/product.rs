//! Product entity - an item a seller offers in the catalog

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::value_objects::Snowflake;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Snowflake,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub url_image: String,
    pub seller_id: Snowflake,
    pub is_active: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new active product
    pub fn new(
        id: Snowflake,
        name: String,
        price: Decimal,
        description: String,
        url_image: String,
        seller_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.trim().to_string(),
            price,
            description,
            url_image,
            seller_id,
            is_active: true,
            published_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.seller_id == user_id
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn set_url_image(&mut self, url_image: String) {
        self.url_image = url_image;
        self.updated_at = Utc::now();
    }

    /// Hide the product from public reads, carts and favorites
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Public seller fields shown next to a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerSummary {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
}

/// Product joined with its seller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithSeller {
    pub product: Product,
    pub seller: SellerSummary,
}
