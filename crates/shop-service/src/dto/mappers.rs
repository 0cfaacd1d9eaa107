//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use std::collections::HashMap;

use shop_core::entities::{
    Cart, Favorite, Order, OrderItem, Product, ProductWithSeller, SalesSummary, SellerSummary,
    User,
};
use shop_core::Snowflake;

use super::responses::{
    BestSellerResponse, CartItemResponse, CartResponse, FavoriteResponse, OrderItemResponse,
    OrderResponse, ProductResponse, SellerResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Product Mappers
// ============================================================================

impl From<&SellerSummary> for SellerResponse {
    fn from(seller: &SellerSummary) -> Self {
        Self {
            id: seller.id.to_string(),
            name: seller.name.clone(),
            email: seller.email.clone(),
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            url_image: product.url_image.clone(),
            seller_id: product.seller_id.to_string(),
            seller: None,
            is_active: product.is_active,
            published_at: product.published_at,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

impl From<&ProductWithSeller> for ProductResponse {
    fn from(row: &ProductWithSeller) -> Self {
        Self {
            seller: Some(SellerResponse::from(&row.seller)),
            ..Self::from(&row.product)
        }
    }
}

impl From<ProductWithSeller> for ProductResponse {
    fn from(row: ProductWithSeller) -> Self {
        Self::from(&row)
    }
}

// ============================================================================
// Cart Mappers
// ============================================================================

/// Cart together with the products its lines reference
pub struct CartWithProducts {
    pub cart: Cart,
    pub products: HashMap<Snowflake, Product>,
}

impl From<CartWithProducts> for CartResponse {
    fn from(data: CartWithProducts) -> Self {
        let CartWithProducts { cart, products } = data;
        Self {
            id: cart.id.to_string(),
            customer_id: cart.customer_id.to_string(),
            items: cart
                .items
                .iter()
                .map(|item| CartItemResponse {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                    added_at: item.added_at,
                    product: products.get(&item.product_id).map(ProductResponse::from),
                })
                .collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

// ============================================================================
// Order Mappers
// ============================================================================

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            subtotal: item.subtotal(),
        }
    }
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_id: order.customer_id.to_string(),
            items: order.items.iter().map(OrderItemResponse::from).collect(),
            total: order.total,
            status: order.status,
            shipping_address: order.shipping_address.clone(),
            ordered_at: order.ordered_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self::from(&order)
    }
}

// ============================================================================
// Favorite Mappers
// ============================================================================

/// Favorite with its product, when the product still exists
pub struct FavoriteWithProduct {
    pub favorite: Favorite,
    pub product: Option<Product>,
}

impl From<FavoriteWithProduct> for FavoriteResponse {
    fn from(data: FavoriteWithProduct) -> Self {
        Self {
            id: data.favorite.id.to_string(),
            user_id: data.favorite.user_id.to_string(),
            product_id: data.favorite.product_id.to_string(),
            created_at: data.favorite.created_at,
            product: data.product.map(ProductResponse::from),
        }
    }
}

// ============================================================================
// Dashboard Mappers
// ============================================================================

impl From<&SalesSummary> for BestSellerResponse {
    fn from(row: &SalesSummary) -> Self {
        Self {
            id: row.product_id.to_string(),
            name: row.name.clone(),
            total_quantity_sold: row.total_quantity_sold,
        }
    }
}
