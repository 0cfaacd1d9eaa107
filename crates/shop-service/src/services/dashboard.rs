//! Seller dashboard service

use rust_decimal::Decimal;
use shop_core::entities::SalesSummary;
use shop_core::{DomainError, Snowflake};
use tracing::instrument;

use crate::dto::{BestSellerResponse, DashboardResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Seller dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Catalog size and sales figures for the calling seller
    ///
    /// Only paid, shipped or delivered orders count as sold.
    #[instrument(skip(self))]
    pub async fn seller(&self, seller_id: Snowflake) -> ServiceResult<DashboardResponse> {
        let seller = self
            .ctx
            .user_repo()
            .find_by_id(seller_id)
            .await?
            .ok_or(ServiceError::UnknownUser)?;
        if !seller.is_seller() {
            return Err(DomainError::NotSeller.into());
        }

        let registered = self.ctx.product_repo().count_by_seller(seller_id).await?;
        let sales = self.ctx.order_repo().sales_by_seller(seller_id).await?;

        Ok(DashboardResponse {
            total_products_registered: registered,
            total_revenue: sales.iter().map(|s| s.total_revenue).sum::<Decimal>(),
            total_products_sold: sales.iter().map(|s| s.total_quantity_sold).sum(),
            best_selling_product: SalesSummary::best_seller(&sales).map(BestSellerResponse::from),
        })
    }
}
