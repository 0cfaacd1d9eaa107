//! Cart service
//!
//! Every operation acts on the single cart of the calling customer.

use std::collections::HashMap;

use shop_core::entities::Cart;
use shop_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AddToCartRequest, CartResponse, CartWithProducts};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Cart service
pub struct CartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CartService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's cart with each line's product populated
    #[instrument(skip(self))]
    pub async fn get(&self, customer_id: Snowflake) -> ServiceResult<CartResponse> {
        let cart = self.load(customer_id).await?;
        self.populate(cart).await
    }

    /// Add `quantity` units of a product (negative to take some away)
    ///
    /// The resulting line quantity must stay at least one; otherwise the
    /// request is rejected and the cart is left as it was.
    #[instrument(skip(self, request), fields(product_id = %request.product_id, quantity = request.quantity))]
    pub async fn add(
        &self,
        customer_id: Snowflake,
        request: AddToCartRequest,
    ) -> ServiceResult<CartResponse> {
        let mut cart = self.load(customer_id).await?;

        let available = self
            .ctx
            .product_repo()
            .find_by_id(request.product_id)
            .await?
            .is_some_and(|p| p.is_active);
        if !available {
            warn!("Add to cart rejected: product unavailable");
            return Err(ServiceError::validation("Product not found"));
        }

        let quantity = cart.add(request.product_id, request.quantity)?;
        self.ctx
            .cart_repo()
            .set_item(cart.id, request.product_id, quantity)
            .await?;

        info!(cart_id = %cart.id, quantity, "Cart line updated");
        self.populate(cart).await
    }

    /// Remove one product line
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        customer_id: Snowflake,
        product_id: Snowflake,
    ) -> ServiceResult<CartResponse> {
        let mut cart = self.load(customer_id).await?;

        if !self.ctx.cart_repo().remove_item(cart.id, product_id).await? {
            return Err(DomainError::NotInCart.into());
        }
        cart.remove(product_id);

        info!(cart_id = %cart.id, "Cart line removed");
        self.populate(cart).await
    }

    /// Remove every line
    #[instrument(skip(self))]
    pub async fn clear(&self, customer_id: Snowflake) -> ServiceResult<CartResponse> {
        let mut cart = self.load(customer_id).await?;

        self.ctx.cart_repo().clear(cart.id).await?;
        cart.clear();

        info!(cart_id = %cart.id, "Cart cleared");
        self.populate(cart).await
    }

    async fn load(&self, customer_id: Snowflake) -> ServiceResult<Cart> {
        self.ctx
            .cart_repo()
            .find_by_customer(customer_id)
            .await?
            .ok_or_else(|| DomainError::CartNotFound.into())
    }

    async fn populate(&self, cart: Cart) -> ServiceResult<CartResponse> {
        let ids: Vec<Snowflake> = cart.items.iter().map(|i| i.product_id).collect();
        let products: HashMap<_, _> = self
            .ctx
            .product_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(CartResponse::from(CartWithProducts { cart, products }))
    }
}
