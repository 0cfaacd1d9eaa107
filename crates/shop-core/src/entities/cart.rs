//! Cart entity - the single shopping cart owned by each customer

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// One product line inside a cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: Snowflake,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Customer cart. Lines keep insertion order and never repeat a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: Snowflake,
    pub customer_id: Snowflake,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart for a customer
    pub fn new(id: Snowflake, customer_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            customer_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, product_id: Snowflake) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Quantity a line would hold after adding `delta` units.
    ///
    /// `delta` may be negative. A zero delta or a result below one is
    /// rejected and nothing is changed.
    pub fn quantity_after(&self, product_id: Snowflake, delta: i32) -> Result<i32, DomainError> {
        if delta == 0 {
            return Err(DomainError::ValidationError(
                "Quantity must be a non-zero integer".to_string(),
            ));
        }

        let current = self.item(product_id).map_or(0, |i| i.quantity);
        let next = current
            .checked_add(delta)
            .ok_or_else(|| DomainError::ValidationError("Quantity out of range".to_string()))?;

        if next < 1 {
            return Err(DomainError::ValidationError(
                "Resulting quantity must be at least 1".to_string(),
            ));
        }
        Ok(next)
    }

    /// Add `delta` units of a product, accumulating on an existing line
    pub fn add(&mut self, product_id: Snowflake, delta: i32) -> Result<i32, DomainError> {
        let next = self.quantity_after(product_id, delta)?;
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = next,
            None => self.items.push(CartItem {
                product_id,
                quantity: next,
                added_at: Utc::now(),
            }),
        }
        self.updated_at = Utc::now();
        Ok(next)
    }

    /// Remove a line. Returns false if the product was not in the cart.
    pub fn remove(&mut self, product_id: Snowflake) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }
}
