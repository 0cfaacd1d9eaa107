//! Domain entities - core business objects

mod cart;
mod favorite;
mod order;
mod product;
mod sales;
mod user;

pub use cart::{Cart, CartItem};
pub use favorite::Favorite;
pub use order::{Order, OrderItem, OrderStatus, ShippingAddress};
pub use product::{Product, ProductWithSeller, SellerSummary};
pub use sales::SalesSummary;
pub use user::{User, UserRole};
