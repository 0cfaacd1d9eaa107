//! Database models - SQLx-compatible structs for PostgreSQL tables

mod cart;
mod favorite;
mod order;
mod product;
mod user;

pub use cart::{CartItemModel, CartModel};
pub use favorite::FavoriteModel;
pub use order::{OrderItemModel, OrderModel, SalesSummaryModel};
pub use product::{ProductModel, ProductWithSellerModel};
pub use user::{PasswordModel, UserModel};
