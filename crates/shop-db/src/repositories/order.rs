//! PostgreSQL implementation of OrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shop_core::entities::{Order, OrderStatus, SalesSummary};
use shop_core::error::DomainError;
use shop_core::traits::{OrderRepository, RepoResult};
use shop_core::value_objects::Snowflake;

use crate::mappers::order_with_items;
use crate::models::{OrderItemModel, OrderModel, SalesSummaryModel};

use super::error::{map_db_error, order_not_found};

/// PostgreSQL implementation of OrderRepository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load lines for a batch of orders, keyed by order id
    async fn load_items(
        &self,
        order_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<OrderItemModel>>, DomainError> {
        let rows = sqlx::query_as::<_, OrderItemModel>(
            r"
            SELECT order_id, product_id, name, unit_price, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, position
            ",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut grouped: HashMap<i64, Vec<OrderItemModel>> = HashMap::new();
        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Order>> {
        let result = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, customer_id, total, status, shipping_street, shipping_city,
                   shipping_postal_code, is_deleted, ordered_at, created_at, updated_at
            FROM orders
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => {
                let mut items = self.load_items(&[model.id]).await?;
                let lines = items.remove(&model.id).unwrap_or_default();
                Ok(Some(order_with_items(model, lines)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Vec<Order>> {
        let results = sqlx::query_as::<_, OrderModel>(
            r"
            SELECT id, customer_id, total, status, shipping_street, shipping_city,
                   shipping_postal_code, is_deleted, ordered_at, created_at, updated_at
            FROM orders
            WHERE customer_id = $1 AND NOT is_deleted
            ORDER BY ordered_at DESC, id DESC
            ",
        )
        .bind(customer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if results.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = results.iter().map(|o| o.id).collect();
        let mut items = self.load_items(&ids).await?;

        Ok(results
            .into_iter()
            .map(|model| {
                let lines = items.remove(&model.id).unwrap_or_default();
                order_with_items(model, lines)
            })
            .collect())
    }

    #[instrument(skip(self, order), fields(order_id = %order.id, lines = order.items.len()))]
    async fn create_from_cart(&self, order: &Order, cart_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO orders (id, customer_id, total, status, shipping_street, shipping_city,
                                shipping_postal_code, is_deleted, ordered_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(order.id.into_inner())
        .bind(order.customer_id.into_inner())
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(&order.shipping_address.street)
        .bind(&order.shipping_address.city)
        .bind(&order.shipping_address.postal_code)
        .bind(order.is_deleted)
        .bind(order.ordered_at)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO order_items (order_id, position, product_id, name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(order.id.into_inner())
            .bind(position as i32)
            .bind(item.product_id.into_inner())
            .bind(&item.name)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(cart_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Snowflake, status: OrderStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(order_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET is_deleted = TRUE, updated_at = NOW()
            WHERE id = $1 AND NOT is_deleted
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(order_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn sales_by_seller(&self, seller_id: Snowflake) -> RepoResult<Vec<SalesSummary>> {
        let sold: Vec<&str> = OrderStatus::SOLD.iter().map(|s| s.as_str()).collect();

        // Revenue uses the unit price snapshotted on each order item, so a
        // later catalogue price change does not rewrite past sales.
        let results = sqlx::query_as::<_, SalesSummaryModel>(
            r"
            SELECT oi.product_id,
                   p.name,
                   SUM(oi.quantity)::BIGINT           AS total_quantity_sold,
                   SUM(oi.unit_price * oi.quantity)   AS total_revenue
            FROM order_items oi
            JOIN orders o   ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE p.seller_id = $1
              AND NOT o.is_deleted
              AND o.status = ANY($2)
            GROUP BY oi.product_id, p.name
            ORDER BY total_quantity_sold DESC, oi.product_id ASC
            ",
        )
        .bind(seller_id.into_inner())
        .bind(&sold)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SalesSummary::from).collect())
    }
}
