//! Cart entity <-> model mapper

use shop_core::entities::{Cart, CartItem};
use shop_core::value_objects::Snowflake;

use crate::models::{CartItemModel, CartModel};

impl From<CartItemModel> for CartItem {
    fn from(model: CartItemModel) -> Self {
        CartItem {
            product_id: Snowflake::new(model.product_id),
            quantity: model.quantity,
            added_at: model.added_at,
        }
    }
}

/// Assemble a cart from its row and its line rows
pub fn cart_with_items(model: CartModel, items: Vec<CartItemModel>) -> Cart {
    Cart {
        id: Snowflake::new(model.id),
        customer_id: Snowflake::new(model.customer_id),
        items: items.into_iter().map(CartItem::from).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
