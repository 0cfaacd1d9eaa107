//! PostgreSQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shop_core::entities::Favorite;
use shop_core::error::DomainError;
use shop_core::traits::{FavoriteRepository, RepoResult};
use shop_core::value_objects::Snowflake;

use crate::models::FavoriteModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Favorite>> {
        let results = sqlx::query_as::<_, FavoriteModel>(
            r"
            SELECT id, user_id, product_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Favorite::from).collect())
    }

    #[instrument(skip(self, favorite), fields(user_id = %favorite.user_id, product_id = %favorite.product_id))]
    async fn create(&self, favorite: &Favorite) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO favorites (id, user_id, product_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(favorite.id.into_inner())
        .bind(favorite.user_id.into_inner())
        .bind(favorite.product_id.into_inner())
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::FavoriteAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, product_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM favorites WHERE user_id = $1 AND product_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(product_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
