//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Required text fields default to empty so that a missing field surfaces as a
//! per-field validation message rather than a body parse failure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use shop_core::entities::{OrderStatus, ShippingAddress, UserRole};
use shop_core::Snowflake;

use super::validation::field_errors;
use crate::services::error::FieldErrors;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Largest price a `NUMERIC(12,2)` column holds
fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

fn storable_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("range").with_message("Price must be >= 0".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("scale")
            .with_message("Price must have at most 2 decimal places".into()));
    }
    if *price > max_price() {
        return Err(ValidationError::new("range")
            .with_message("Price must be at most 9999999999.99".into()));
    }
    Ok(())
}

fn known_order_status(status: &str) -> Result<(), ValidationError> {
    status.parse::<OrderStatus>().map(|_| ()).map_err(|_| {
        ValidationError::new("status").with_message(
            "Status must be one of Pendente, Pago, Enviado, Entregue, Cancelado".into(),
        )
    })
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(required(message = "Role is required"))]
    pub role: Option<UserRole>,
}

/// Partial user update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

// ============================================================================
// Product Requests
// ============================================================================

/// Create product request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 200, message = "Name must be at most 200 characters")
    )]
    pub name: String,

    #[validate(
        required(message = "Price is required"),
        custom(function = "storable_price")
    )]
    pub price: Option<Decimal>,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub url_image: String,
}

/// Partial product update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(
        custom(function = "not_blank", message = "Name must not be blank"),
        length(max = 200, message = "Name must be at most 200 characters")
    )]
    pub name: Option<String>,

    #[validate(custom(function = "storable_price"))]
    pub price: Option<Decimal>,

    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: Option<String>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub url_image: Option<String>,
}

/// One data row of a product CSV upload
///
/// Every column is read as text; conversion and validation happen in
/// [`ProductCsvRow::into_request`] so a bad row yields field messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductCsvRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url_image: String,
}

impl ProductCsvRow {
    /// Columns a product CSV must carry in its header
    pub const COLUMNS: [&'static str; 4] = ["name", "price", "description", "url_image"];

    /// Convert to a create request, collecting every field error
    pub fn into_request(self) -> Result<CreateProductRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let price = if self.price.is_empty() {
            None
        } else {
            match self.price.parse::<Decimal>() {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.insert("price".to_string(), "Price must be a number".to_string());
                    None
                }
            }
        };

        let request = CreateProductRequest {
            name: self.name,
            price,
            description: self.description,
            url_image: self.url_image,
        };

        if let Err(e) = request.validate() {
            for (field, msg) in field_errors(&e) {
                errors.entry(field).or_insert(msg);
            }
        }

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Cart Requests
// ============================================================================

fn default_quantity() -> i32 {
    1
}

/// Add (or with a negative quantity, remove) units of a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub product_id: Snowflake,

    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

// ============================================================================
// Order Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShippingAddressRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Street is required"))]
    pub street: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Postal code is required"))]
    pub postal_code: String,
}

impl From<ShippingAddressRequest> for ShippingAddress {
    fn from(req: ShippingAddressRequest) -> Self {
        Self {
            street: req.street.trim().to_string(),
            city: req.city.trim().to_string(),
            postal_code: req.postal_code.trim().to_string(),
        }
    }
}

/// Place an order from the caller's cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(required(message = "Shipping address is required"), nested)]
    pub shipping_address: Option<ShippingAddressRequest>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[serde(default)]
    #[validate(custom(function = "known_order_status"))]
    pub status: String,
}

// ============================================================================
// Favorite Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    pub product_id: Snowflake,
}
