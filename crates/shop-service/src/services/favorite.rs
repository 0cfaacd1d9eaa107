//! Favorite service

use std::collections::HashMap;

use shop_core::entities::Favorite;
use shop_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    AddFavoriteRequest, FavoriteCreatedResponse, FavoriteResponse, FavoriteWithProduct,
    MessageResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Favorite service
pub struct FavoriteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FavoriteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's favorites with their products
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<FavoriteResponse>> {
        let favorites = self.ctx.favorite_repo().find_by_user(user_id).await?;

        let ids: Vec<Snowflake> = favorites.iter().map(|f| f.product_id).collect();
        let mut products: HashMap<_, _> = self
            .ctx
            .product_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(favorites
            .into_iter()
            .map(|favorite| {
                let product = products.remove(&favorite.product_id);
                FavoriteResponse::from(FavoriteWithProduct { favorite, product })
            })
            .collect())
    }

    /// Favorite an active product. Favoriting it twice is a conflict.
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn add(
        &self,
        user_id: Snowflake,
        request: AddFavoriteRequest,
    ) -> ServiceResult<FavoriteCreatedResponse> {
        let product = self
            .ctx
            .product_repo()
            .find_by_id(request.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DomainError::ProductNotFound(request.product_id))?;

        let favorite = Favorite::new(self.ctx.generate_id(), user_id, product.id);
        self.ctx.favorite_repo().create(&favorite).await?;

        info!(favorite_id = %favorite.id, "Favorite added");
        Ok(FavoriteCreatedResponse {
            message: "Product added to favorites".to_string(),
            favorite: FavoriteResponse::from(FavoriteWithProduct {
                favorite,
                product: Some(product),
            }),
        })
    }

    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        user_id: Snowflake,
        product_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        if !self.ctx.favorite_repo().delete(user_id, product_id).await? {
            return Err(DomainError::FavoriteNotFound.into());
        }

        info!("Favorite removed");
        Ok(MessageResponse::new("Product removed from favorites"))
    }
}
