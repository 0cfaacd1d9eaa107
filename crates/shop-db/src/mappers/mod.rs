//! Model to entity mappers
//!
//! `From<Model> for Entity` converts database rows to domain objects. Entities
//! assembled from several queries (carts, orders) have explicit builder fns.

mod cart;
mod favorite;
mod order;
mod product;
mod user;

pub use cart::cart_with_items;
pub use order::order_with_items;
