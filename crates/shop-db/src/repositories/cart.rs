//! PostgreSQL implementation of CartRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shop_core::entities::Cart;
use shop_core::error::DomainError;
use shop_core::traits::{CartRepository, RepoResult};
use shop_core::value_objects::Snowflake;

use crate::mappers::cart_with_items;
use crate::models::{CartItemModel, CartModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CartRepository
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn touch(&self, cart_id: Snowflake) -> Result<(), DomainError> {
        sqlx::query("UPDATE carts SET updated_at = NOW() WHERE id = $1")
            .bind(cart_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self))]
    async fn find_by_customer(&self, customer_id: Snowflake) -> RepoResult<Option<Cart>> {
        let cart = sqlx::query_as::<_, CartModel>(
            r"
            SELECT id, customer_id, created_at, updated_at
            FROM carts
            WHERE customer_id = $1
            ",
        )
        .bind(customer_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartItemModel>(
            r"
            SELECT product_id, quantity, added_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY added_at, product_id
            ",
        )
        .bind(cart.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(cart_with_items(cart, items)))
    }

    #[instrument(skip(self))]
    async fn set_item(
        &self,
        cart_id: Snowflake,
        product_id: Snowflake,
        quantity: i32,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity, added_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity
            ",
        )
        .bind(cart_id.into_inner())
        .bind(product_id.into_inner())
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.touch(cart_id).await
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, cart_id: Snowflake, product_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id.into_inner())
        .bind(product_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        self.touch(cart_id).await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn clear(&self, cart_id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.touch(cart_id).await
    }
}
