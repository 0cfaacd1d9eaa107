//! In-memory repositories for service unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use shop_common::auth::{JwtService, PasswordService};
use shop_core::entities::{
    Cart, CartItem, Favorite, Order, OrderStatus, Product, ProductWithSeller, SalesSummary,
    SellerSummary, User, UserRole,
};
use shop_core::traits::{
    CartRepository, FavoriteRepository, OrderRepository, ProductRepository, RepoResult,
    UserRepository,
};
use shop_core::{DomainError, PasswordDigest, Snowflake, SnowflakeGenerator};

use super::context::ServiceContext;

pub const TEST_SECRET: &str = "test-secret-key";

#[derive(Default)]
struct State {
    users: Vec<(User, PasswordDigest)>,
    products: Vec<Product>,
    carts: Vec<Cart>,
    orders: Vec<Order>,
    favorites: Vec<Favorite>,
}

/// One store backing every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Context wired to this store with a cheap password cost
    pub fn context(self: &Arc<Self>) -> ServiceContext {
        ServiceContext::builder()
            .user_repo(self.clone())
            .product_repo(self.clone())
            .cart_repo(self.clone())
            .order_repo(self.clone())
            .favorite_repo(self.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
            .password_service(PasswordService::new(1_000))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
            .build()
            .expect("test context")
    }

    pub fn user(&self, id: Snowflake) -> Option<User> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone())
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn product(&self, id: Snowflake) -> Option<Product> {
        let state = self.state.lock().unwrap();
        state.products.iter().find(|p| p.id == id).cloned()
    }

    pub fn cart_of(&self, customer_id: Snowflake) -> Option<Cart> {
        let state = self.state.lock().unwrap();
        state.carts.iter().find(|c| c.customer_id == customer_id).cloned()
    }

    /// Change a product's price behind the services' back
    pub fn set_price(&self, id: Snowflake, price: Decimal) {
        let mut state = self.state.lock().unwrap();
        if let Some(p) = state.products.iter_mut().find(|p| p.id == id) {
            p.price = price;
        }
    }

    /// Drop a user's cart entirely
    pub fn remove_cart(&self, customer_id: Snowflake) {
        let mut state = self.state.lock().unwrap();
        state.carts.retain(|c| c.customer_id != customer_id);
    }

    /// Hard-remove a product, as if it vanished from the catalog
    pub fn remove_product(&self, id: Snowflake) {
        let mut state = self.state.lock().unwrap();
        state.products.retain(|p| p.id != id);
    }

    fn seller_of(state: &State, product: &Product) -> SellerSummary {
        state
            .users
            .iter()
            .find(|(u, _)| u.id == product.seller_id)
            .map_or_else(
                || SellerSummary {
                    id: product.seller_id,
                    name: String::new(),
                    email: String::new(),
                },
                |(u, _)| SellerSummary {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                },
            )
    }

    fn with_seller(state: &State, product: &Product) -> ProductWithSeller {
        ProductWithSeller {
            product: product.clone(),
            seller: Self::seller_of(state, product),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().map(|(u, _)| u.clone()).collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().any(|(u, _)| u.email == email))
    }

    async fn create_with_cart(
        &self,
        user: &User,
        password: &PasswordDigest,
        cart: &Cart,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.users.push((user.clone(), password.clone()));
        state.carts.push(cart.clone());
        Ok(())
    }

    async fn update(&self, user: &User, password: Option<&PasswordDigest>) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.email == user.email && u.id != user.id) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let (stored, digest) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *stored = user.clone();
        if let Some(password) = password {
            *digest = password.clone();
        }
        Ok(())
    }

    async fn deactivate(&self, id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock().unwrap();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.is_active = false;
        let role = user.role;

        let mut count = 0;
        if role == UserRole::Vendedor {
            for product in state.products.iter_mut().filter(|p| p.seller_id == id && p.is_active) {
                product.is_active = false;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn get_password(&self, id: Snowflake) -> RepoResult<Option<PasswordDigest>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|(u, _)| u.id == id).map(|(_, p)| p.clone()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>> {
        Ok(self.product(id))
    }

    async fn find_active_with_seller(
        &self,
        id: Snowflake,
    ) -> RepoResult<Option<ProductWithSeller>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .find(|p| p.id == id && p.is_active)
            .map(|p| Self::with_seller(&state, p)))
    }

    async fn find_active(&self) -> RepoResult<Vec<ProductWithSeller>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.is_active)
            .map(|p| Self::with_seller(&state, p))
            .collect())
    }

    async fn find_active_by_seller(
        &self,
        seller_id: Snowflake,
    ) -> RepoResult<Vec<ProductWithSeller>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.is_active && p.seller_id == seller_id)
            .map(|p| Self::with_seller(&state, p))
            .collect())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }

    async fn create(&self, product: &Product) -> RepoResult<()> {
        self.state.lock().unwrap().products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(DomainError::ProductNotFound(product.id))?;
        *stored = product.clone();
        Ok(())
    }

    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::ProductNotFound(id))?;
        stored.is_active = false;
        Ok(())
    }

    async fn count_by_seller(&self, seller_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().filter(|p| p.seller_id == seller_id).count() as i64)
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Option<Cart>> {
        Ok(self.cart_of(customer_id))
    }

    async fn set_item(
        &self,
        cart_id: Snowflake,
        product_id: Snowflake,
        quantity: i32,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let cart = state
            .carts
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or(DomainError::CartNotFound)?;
        match cart.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => line.quantity = quantity,
            None => cart.items.push(CartItem {
                product_id,
                quantity,
                added_at: Utc::now(),
            }),
        }
        Ok(())
    }

    async fn remove_item(&self, cart_id: Snowflake, product_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        let cart = state
            .carts
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or(DomainError::CartNotFound)?;
        Ok(cart.remove(product_id))
    }

    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(cart) = state.carts.iter_mut().find(|c| c.id == cart_id) {
            cart.clear();
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().find(|o| o.id == id && !o.is_deleted).cloned())
    }

    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id && !o.is_deleted)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }

    async fn create_from_cart(&self, order: &Order, cart_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        state.orders.push(order.clone());
        if let Some(cart) = state.carts.iter_mut().find(|c| c.id == cart_id) {
            cart.clear();
        }
        Ok(())
    }

    async fn update_status(&self, id: Snowflake, status: OrderStatus) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id && !o.is_deleted)
            .ok_or(DomainError::OrderNotFound(id))?;
        order.set_status(status);
        Ok(())
    }

    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id && !o.is_deleted)
            .ok_or(DomainError::OrderNotFound(id))?;
        order.mark_deleted();
        Ok(())
    }

    async fn sales_by_seller(&self, seller_id: Snowflake) -> RepoResult<Vec<SalesSummary>> {
        let state = self.state.lock().unwrap();
        let mut grouped: HashMap<Snowflake, SalesSummary> = HashMap::new();

        for order in state.orders.iter().filter(|o| !o.is_deleted && o.status.counts_as_sale()) {
            for line in &order.items {
                let Some(product) = state
                    .products
                    .iter()
                    .find(|p| p.id == line.product_id && p.seller_id == seller_id)
                else {
                    continue;
                };
                let entry = grouped.entry(product.id).or_insert_with(|| SalesSummary {
                    product_id: product.id,
                    name: product.name.clone(),
                    total_quantity_sold: 0,
                    total_revenue: Decimal::ZERO,
                });
                entry.total_quantity_sold += i64::from(line.quantity);
                entry.total_revenue += line.subtotal();
            }
        }

        let mut rows: Vec<SalesSummary> = grouped.into_values().collect();
        rows.sort_by(|a, b| {
            b.total_quantity_sold
                .cmp(&a.total_quantity_sold)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        Ok(rows)
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>> {
        let state = self.state.lock().unwrap();
        Ok(state.favorites.iter().filter(|f| f.user_id == user_id).cloned().collect())
    }

    async fn create(&self, favorite: &Favorite) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.product_id == favorite.product_id)
        {
            return Err(DomainError::FavoriteAlreadyExists);
        }
        state.favorites.push(favorite.clone());
        Ok(())
    }

    async fn delete(&self, user_id: Snowflake, product_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.favorites.len();
        state
            .favorites
            .retain(|f| !(f.user_id == user_id && f.product_id == product_id));
        Ok(state.favorites.len() != before)
    }
}
