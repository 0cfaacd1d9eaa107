//! Domain traits (repository ports)

mod repositories;

pub use repositories::{
    CartRepository, FavoriteRepository, OrderRepository, ProductRepository, RepoResult,
    UserRepository,
};
