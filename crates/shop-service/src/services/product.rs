//! Product service
//!
//! Catalog reads, seller-owned writes and CSV bulk import.

use shop_core::entities::{Product, User};
use shop_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    CreateProductRequest, CsvRowError, CsvUploadResponse, ProductCsvRow, ProductDeletedResponse,
    ProductResponse, UpdateProductRequest,
};
use crate::services::error::FieldErrors;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Product service
pub struct ProductService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProductService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a product owned by the calling seller
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        seller_id: Snowflake,
        request: CreateProductRequest,
    ) -> ServiceResult<ProductResponse> {
        self.ensure_seller(seller_id).await?;

        let product = self.build(seller_id, request)?;
        self.ctx.product_repo().create(&product).await?;

        info!(product_id = %product.id, "Product created");
        Ok(ProductResponse::from(&product))
    }

    /// List active products with their sellers
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ProductResponse>> {
        let products = self.ctx.product_repo().find_active().await?;
        Ok(products.iter().map(ProductResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, product_id: Snowflake) -> ServiceResult<ProductResponse> {
        let product = self
            .ctx
            .product_repo()
            .find_active_with_seller(product_id)
            .await?
            .ok_or(DomainError::ProductNotFound(product_id))?;
        Ok(ProductResponse::from(&product))
    }

    /// List a seller's active products
    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: Snowflake) -> ServiceResult<Vec<ProductResponse>> {
        let is_seller = self
            .ctx
            .user_repo()
            .find_by_id(seller_id)
            .await?
            .is_some_and(|u| u.is_seller());
        if !is_seller {
            return Err(ServiceError::validation("Seller not found"));
        }

        let products = self.ctx.product_repo().find_active_by_seller(seller_id).await?;
        Ok(products.iter().map(ProductResponse::from).collect())
    }

    /// Apply a partial update to one of the caller's products
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor_id: Snowflake,
        product_id: Snowflake,
        request: UpdateProductRequest,
    ) -> ServiceResult<ProductResponse> {
        let mut product = self.load_owned(actor_id, product_id).await?;

        if let Some(name) = request.name.as_deref() {
            product.set_name(name);
        }
        if let Some(price) = request.price {
            product.set_price(price);
        }
        if let Some(description) = request.description.as_deref() {
            product.set_description(description);
        }
        if let Some(url_image) = request.url_image {
            product.set_url_image(url_image);
        }

        self.ctx.product_repo().update(&product).await?;

        info!(product_id = %product_id, "Product updated");
        Ok(ProductResponse::from(&product))
    }

    /// Soft delete one of the caller's products
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        actor_id: Snowflake,
        product_id: Snowflake,
    ) -> ServiceResult<ProductDeletedResponse> {
        let mut product = self.load_owned(actor_id, product_id).await?;

        self.ctx.product_repo().deactivate(product_id).await?;
        product.deactivate();

        info!(product_id = %product_id, "Product deactivated");
        Ok(ProductDeletedResponse {
            message: "Product deactivated successfully".to_string(),
            product: ProductResponse::from(&product),
        })
    }

    /// Create products from a CSV document
    ///
    /// The header must name `name,price,description,url_image`. Rows are
    /// validated and inserted one at a time; a failing row is reported and
    /// the rest of the file is still processed.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn import_csv(
        &self,
        seller_id: Snowflake,
        data: &[u8],
    ) -> ServiceResult<CsvUploadResponse> {
        self.ensure_seller(seller_id).await?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| ServiceError::validation(format!("Invalid CSV: {e}")))?;
        let missing: Vec<&str> = ProductCsvRow::COLUMNS
            .into_iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::validation(format!(
                "CSV header is missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut response = CsvUploadResponse::default();

        for (index, record) in reader.deserialize::<ProductCsvRow>().enumerate() {
            let row = index + 1;

            let request = match record {
                Ok(parsed) => parsed.into_request(),
                Err(e) => {
                    let mut errors = FieldErrors::new();
                    errors.insert("row".to_string(), e.to_string());
                    Err(errors)
                }
            };

            match request {
                Ok(request) => {
                    let product = self.build(seller_id, request)?;
                    self.ctx.product_repo().create(&product).await?;
                    debug!(row, product_id = %product.id, "CSV row imported");
                    response.created += 1;
                }
                Err(errors) => {
                    debug!(row, "CSV row rejected");
                    response.errors.push(CsvRowError { row, errors });
                }
            }
        }

        info!(
            created = response.created,
            rejected = response.errors.len(),
            "CSV import finished"
        );
        Ok(response)
    }

    fn build(&self, seller_id: Snowflake, request: CreateProductRequest) -> ServiceResult<Product> {
        let price = request
            .price
            .ok_or_else(|| ServiceError::invalid_field("price", "Price is required"))?;

        Ok(Product::new(
            self.ctx.generate_id(),
            request.name,
            price,
            request.description.trim().to_string(),
            request.url_image,
            seller_id,
        ))
    }

    async fn ensure_seller(&self, user_id: Snowflake) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UnknownUser)?;

        if !user.is_seller() {
            warn!(user_id = %user_id, "Seller-only action attempted by customer");
            return Err(DomainError::NotSeller.into());
        }
        Ok(user)
    }

    /// Load an active product and check the caller owns it
    async fn load_owned(&self, actor_id: Snowflake, product_id: Snowflake) -> ServiceResult<Product> {
        let product = self
            .ctx
            .product_repo()
            .find_by_id(product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DomainError::ProductNotFound(product_id))?;

        if !product.is_owned_by(actor_id) {
            warn!(product_id = %product_id, actor_id = %actor_id, "Product change by non-owner");
            return Err(DomainError::NotOwner.into());
        }
        Ok(product)
    }
}
