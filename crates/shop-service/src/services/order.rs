//! Order service
//!
//! Checkout from the cart, order reads, status changes and soft deletes.

use std::collections::HashMap;

use shop_core::entities::{Order, OrderItem, OrderStatus, ShippingAddress};
use shop_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CreateOrderRequest, OrderDeletedResponse, OrderResponse, UpdateOrderStatusRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Order service
pub struct OrderService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OrderService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Turn the caller's cart into a pending order
    ///
    /// Each line snapshots the product's current name and price. The order
    /// is stored and the cart emptied in a single transaction.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        customer_id: Snowflake,
        request: CreateOrderRequest,
    ) -> ServiceResult<OrderResponse> {
        let shipping: ShippingAddress = request
            .shipping_address
            .ok_or_else(|| {
                ServiceError::invalid_field("shipping_address", "Shipping address is required")
            })?
            .into();

        if self.ctx.user_repo().find_by_id(customer_id).await?.is_none() {
            return Err(ServiceError::UnknownUser);
        }

        let cart = self
            .ctx
            .cart_repo()
            .find_by_customer(customer_id)
            .await?
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                warn!("Order rejected: cart is empty");
                ServiceError::from(DomainError::EmptyCart)
            })?;

        let ids: Vec<Snowflake> = cart.items.iter().map(|i| i.product_id).collect();
        let products: HashMap<_, _> = self
            .ctx
            .product_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let items = cart
            .items
            .iter()
            .map(|line| {
                let product = products.get(&line.product_id).ok_or_else(|| {
                    ServiceError::validation(format!(
                        "Product {} in cart no longer exists",
                        line.product_id
                    ))
                })?;
                Ok(OrderItem {
                    product_id: product.id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity: line.quantity,
                })
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        let order = Order::new(self.ctx.generate_id(), customer_id, items, shipping);
        self.ctx.order_repo().create_from_cart(&order, cart.id).await?;

        info!(order_id = %order.id, total = %order.total, lines = order.items.len(), "Order created");
        Ok(OrderResponse::from(&order))
    }

    /// The caller's orders, newest first
    #[instrument(skip(self))]
    pub async fn list_mine(&self, customer_id: Snowflake) -> ServiceResult<Vec<OrderResponse>> {
        let orders = self.ctx.order_repo().find_by_customer(customer_id).await?;
        Ok(orders.iter().map(OrderResponse::from).collect())
    }

    /// Orders of a given user; callers may only ask about themselves
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        actor_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<OrderResponse>> {
        if actor_id != user_id {
            return Err(ServiceError::forbidden("You can only view your own orders"));
        }
        self.list_mine(user_id).await
    }

    /// One of the caller's orders. Someone else's order reads as missing.
    #[instrument(skip(self))]
    pub async fn get(&self, actor_id: Snowflake, order_id: Snowflake) -> ServiceResult<OrderResponse> {
        let order = self
            .load(order_id)
            .await?
            .filter(|o| o.is_owned_by(actor_id))
            .ok_or(DomainError::OrderNotFound(order_id))?;
        Ok(OrderResponse::from(&order))
    }

    /// Set an order's status
    ///
    /// Allowed for the order's customer and for any seller. Any status may
    /// follow any other.
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_status(
        &self,
        actor_id: Snowflake,
        order_id: Snowflake,
        request: UpdateOrderStatusRequest,
    ) -> ServiceResult<OrderResponse> {
        let status: OrderStatus = request
            .status
            .parse()
            .map_err(|e: String| ServiceError::invalid_field("status", e))?;

        let mut order = self
            .load(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))?;

        if !order.is_owned_by(actor_id) {
            let actor_is_seller = self
                .ctx
                .user_repo()
                .find_by_id(actor_id)
                .await?
                .is_some_and(|u| u.is_seller());
            if !actor_is_seller {
                warn!(order_id = %order_id, "Status change by unrelated customer");
                return Err(DomainError::NotOwner.into());
            }
        }

        self.ctx.order_repo().update_status(order_id, status).await?;
        order.set_status(status);

        info!(order_id = %order_id, status = %status, "Order status changed");
        Ok(OrderResponse::from(&order))
    }

    /// Soft delete one of the caller's orders
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        actor_id: Snowflake,
        order_id: Snowflake,
    ) -> ServiceResult<OrderDeletedResponse> {
        let mut order = self
            .load(order_id)
            .await?
            .ok_or(DomainError::OrderNotFound(order_id))?;

        if !order.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        self.ctx.order_repo().soft_delete(order_id).await?;
        order.mark_deleted();

        info!(order_id = %order_id, "Order deleted");
        Ok(OrderDeletedResponse {
            message: "Order deleted successfully".to_string(),
            order: OrderResponse::from(&order),
        })
    }

    async fn load(&self, order_id: Snowflake) -> ServiceResult<Option<Order>> {
        Ok(self.ctx.order_repo().find_by_id(order_id).await?)
    }
}
