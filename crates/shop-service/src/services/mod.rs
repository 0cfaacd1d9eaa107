//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod cart;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod favorite;
pub mod order;
pub mod product;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthService;
pub use cart::CartService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_UPLOAD_MAX_BYTES};
pub use dashboard::DashboardService;
pub use error::{FieldErrors, ServiceError, ServiceResult};
pub use favorite::FavoriteService;
pub use order::OrderService;
pub use product::ProductService;
pub use user::UserService;
