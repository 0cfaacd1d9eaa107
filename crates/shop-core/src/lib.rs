//! # shop-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Cart, CartItem, Favorite, Order, OrderItem, OrderStatus, Product, ProductWithSeller,
    SalesSummary, SellerSummary, ShippingAddress, User, UserRole,
};
pub use error::DomainError;
pub use traits::{
    CartRepository, FavoriteRepository, OrderRepository, ProductRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{PasswordDigest, Snowflake, SnowflakeGenerator, SnowflakeParseError};
