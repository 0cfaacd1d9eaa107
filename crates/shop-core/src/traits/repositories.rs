//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Cart, Favorite, Order, OrderStatus, Product, ProductWithSeller, SalesSummary, User,
};
use crate::error::DomainError;
use crate::value_objects::{PasswordDigest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, active or not
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// List every user, including deactivated ones
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Check if email is already taken by any user
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Insert a user together with their empty cart, atomically
    async fn create_with_cart(
        &self,
        user: &User,
        password: &PasswordDigest,
        cart: &Cart,
    ) -> RepoResult<()>;

    /// Update profile fields (name, email) and, when given, the password
    /// material. All of it lands in one write or none of it does.
    async fn update(&self, user: &User, password: Option<&PasswordDigest>) -> RepoResult<()>;

    /// Soft delete a user. A seller's products are deactivated in the
    /// same transaction. Returns the number of products deactivated.
    async fn deactivate(&self, id: Snowflake) -> RepoResult<u64>;

    /// Get stored password material for authentication
    async fn get_password(&self, id: Snowflake) -> RepoResult<Option<PasswordDigest>>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID regardless of its active flag
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>>;

    /// Find an active product joined with its seller
    async fn find_active_with_seller(&self, id: Snowflake)
        -> RepoResult<Option<ProductWithSeller>>;

    /// List all active products joined with their sellers
    async fn find_active(&self) -> RepoResult<Vec<ProductWithSeller>>;

    /// List a seller's active products
    async fn find_active_by_seller(&self, seller_id: Snowflake)
        -> RepoResult<Vec<ProductWithSeller>>;

    /// Fetch products by ID in one round trip, active or not
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Product>>;

    /// Create a new product
    async fn create(&self, product: &Product) -> RepoResult<()>;

    /// Update an existing product
    async fn update(&self, product: &Product) -> RepoResult<()>;

    /// Soft delete a product
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()>;

    /// Count all products registered by a seller, active or not
    async fn count_by_seller(&self, seller_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Cart Repository
// ============================================================================

#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find the customer's cart with its lines in insertion order
    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Option<Cart>>;

    /// Set the quantity of a line, inserting it if absent
    async fn set_item(&self, cart_id: Snowflake, product_id: Snowflake, quantity: i32)
        -> RepoResult<()>;

    /// Remove a line. Returns false if it was not in the cart.
    async fn remove_item(&self, cart_id: Snowflake, product_id: Snowflake) -> RepoResult<bool>;

    /// Remove all lines
    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Order Repository
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find a non-deleted order by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Order>>;

    /// List a customer's non-deleted orders, newest first
    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Vec<Order>>;

    /// Insert the order and empty the cart it was built from, atomically
    async fn create_from_cart(&self, order: &Order, cart_id: Snowflake) -> RepoResult<()>;

    /// Set the status of a non-deleted order
    async fn update_status(&self, id: Snowflake, status: OrderStatus) -> RepoResult<()>;

    /// Soft delete an order
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Per-product units and revenue for a seller, over non-deleted orders
    /// in a sold status
    async fn sales_by_seller(&self, seller_id: Snowflake) -> RepoResult<Vec<SalesSummary>>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// List a user's favorites, oldest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>>;

    /// Create a favorite. A duplicate fails with `FavoriteAlreadyExists`.
    async fn create(&self, favorite: &Favorite) -> RepoResult<()>;

    /// Delete a favorite. Returns false if nothing was removed.
    async fn delete(&self, user_id: Snowflake, product_id: Snowflake) -> RepoResult<bool>;
}
