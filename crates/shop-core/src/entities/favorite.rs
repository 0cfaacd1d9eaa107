//! Favorite entity - a product bookmarked by a user

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub product_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(id: Snowflake, user_id: Snowflake, product_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            product_id,
            created_at: Utc::now(),
        }
    }
}
