//! # shop-db
//!
//! Database layer implementing the shop-core repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and the migration runner
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use shop_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! run_migrations(&pool, "./migrations").await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCartRepository, PgFavoriteRepository, PgOrderRepository, PgProductRepository,
    PgUserRepository,
};
