//! Seller sales aggregates

use rust_decimal::Decimal;

use crate::value_objects::Snowflake;

/// Units and revenue sold for one product across counted orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub product_id: Snowflake,
    pub name: String,
    pub total_quantity_sold: i64,
    pub total_revenue: Decimal,
}

impl SalesSummary {
    /// Highest quantity wins, ties go to the lowest product id
    pub fn best_seller(rows: &[SalesSummary]) -> Option<&SalesSummary> {
        rows.iter().max_by(|a, b| {
            a.total_quantity_sold
                .cmp(&b.total_quantity_sold)
                .then_with(|| b.product_id.cmp(&a.product_id))
        })
    }
}
