//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in shop-core.
//! Each repository handles database operations for a specific domain entity.

mod cart;
mod error;
mod favorite;
mod order;
mod product;
mod user;

pub use cart::PgCartRepository;
pub use favorite::PgFavoriteRepository;
pub use order::PgOrderRepository;
pub use product::PgProductRepository;
pub use user::PgUserRepository;
