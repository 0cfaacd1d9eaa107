//! Service context - dependency container for services
//!
//! Holds the repositories, auth helpers and id generator needed by services.

use std::sync::Arc;

use shop_common::auth::{JwtService, PasswordService};
use shop_core::traits::{
    CartRepository, FavoriteRepository, OrderRepository, ProductRepository, UserRepository,
};
use shop_core::{Snowflake, SnowflakeGenerator};
use shop_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Default cap on uploaded CSV files (2 MiB)
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// The pool is optional so that services can run against in-memory
/// repositories; readiness reports unhealthy without one.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    product_repo: Arc<dyn ProductRepository>,
    cart_repo: Arc<dyn CartRepository>,
    order_repo: Arc<dyn OrderRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
    upload_max_bytes: usize,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is attached
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    pub fn cart_repo(&self) -> &dyn CartRepository {
        self.cart_repo.as_ref()
    }

    pub fn order_repo(&self) -> &dyn OrderRepository {
        self.order_repo.as_ref()
    }

    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hasher
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Largest accepted CSV upload in bytes
    pub fn upload_max_bytes(&self) -> usize {
        self.upload_max_bytes
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("password_iterations", &self.password_service.iterations())
            .field("upload_max_bytes", &self.upload_max_bytes)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    cart_repo: Option<Arc<dyn CartRepository>>,
    order_repo: Option<Arc<dyn OrderRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<PasswordService>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    upload_max_bytes: Option<usize>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn product_repo(mut self, repo: Arc<dyn ProductRepository>) -> Self {
        self.product_repo = Some(repo);
        self
    }

    pub fn cart_repo(mut self, repo: Arc<dyn CartRepository>) -> Self {
        self.cart_repo = Some(repo);
        self
    }

    pub fn order_repo(mut self, repo: Arc<dyn OrderRepository>) -> Self {
        self.order_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: PasswordService) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn upload_max_bytes(mut self, max: usize) -> Self {
        self.upload_max_bytes = Some(max);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a repository or the JWT service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            product_repo: required(self.product_repo, "product_repo")?,
            cart_repo: required(self.cart_repo, "cart_repo")?,
            order_repo: required(self.order_repo, "order_repo")?,
            favorite_repo: required(self.favorite_repo, "favorite_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: self.password_service.unwrap_or_default(),
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            upload_max_bytes: self.upload_max_bytes.unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::InMemoryStore;

    #[test]
    fn test_build_requires_jwt_service() {
        let store = InMemoryStore::new();
        let err = ServiceContext::builder()
            .user_repo(store.clone())
            .product_repo(store.clone())
            .cart_repo(store.clone())
            .order_repo(store.clone())
            .favorite_repo(store)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("jwt_service"));
    }

    #[test]
    fn test_build_defaults() {
        let ctx = InMemoryStore::new().context();
        assert!(ctx.pool().is_none());
        assert_eq!(ctx.upload_max_bytes(), DEFAULT_UPLOAD_MAX_BYTES);
        assert_ne!(ctx.generate_id(), ctx.generate_id());
    }
}
