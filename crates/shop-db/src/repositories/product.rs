//! PostgreSQL implementation of ProductRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shop_core::entities::{Product, ProductWithSeller};
use shop_core::traits::{ProductRepository, RepoResult};
use shop_core::value_objects::Snowflake;

use crate::models::{ProductModel, ProductWithSellerModel};

use super::error::{map_db_error, product_not_found};

/// Product columns joined with the seller's public columns
const SELECT_WITH_SELLER: &str = r"
    SELECT p.id, p.name, p.price, p.description, p.url_image, p.seller_id, p.is_active,
           p.published_at, p.created_at, p.updated_at,
           u.name AS seller_name, u.email AS seller_email
    FROM products p
    JOIN users u ON u.id = p.seller_id
";

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>> {
        let result = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, name, price, description, url_image, seller_id, is_active,
                   published_at, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_active_with_seller(
        &self,
        id: Snowflake,
    ) -> RepoResult<Option<ProductWithSeller>> {
        let sql = format!("{SELECT_WITH_SELLER} WHERE p.id = $1 AND p.is_active");
        let result = sqlx::query_as::<_, ProductWithSellerModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(ProductWithSeller::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<ProductWithSeller>> {
        let sql = format!("{SELECT_WITH_SELLER} WHERE p.is_active ORDER BY p.id");
        let results = sqlx::query_as::<_, ProductWithSellerModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(ProductWithSeller::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_by_seller(
        &self,
        seller_id: Snowflake,
    ) -> RepoResult<Vec<ProductWithSeller>> {
        let sql = format!("{SELECT_WITH_SELLER} WHERE p.seller_id = $1 AND p.is_active ORDER BY p.id");
        let results = sqlx::query_as::<_, ProductWithSellerModel>(&sql)
            .bind(seller_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(ProductWithSeller::from).collect())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, name, price, description, url_image, seller_id, is_active,
                   published_at, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            ",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: &Product) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO products (id, name, price, description, url_image, seller_id, is_active,
                                  published_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.url_image)
        .bind(product.seller_id.into_inner())
        .bind(product.is_active)
        .bind(product.published_at)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn update(&self, product: &Product) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $2, price = $3, description = $4, url_image = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(product.id.into_inner())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.url_image)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(product.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn deactivate(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_seller(&self, seller_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM products WHERE seller_id = $1
            ",
        )
        .bind(seller_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
