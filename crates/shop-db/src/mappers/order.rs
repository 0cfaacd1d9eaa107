//! Order entity <-> model mapper

use shop_core::entities::{Order, OrderItem, OrderStatus, SalesSummary, ShippingAddress};
use shop_core::value_objects::Snowflake;

use crate::models::{OrderItemModel, OrderModel, SalesSummaryModel};

impl From<OrderItemModel> for OrderItem {
    fn from(model: OrderItemModel) -> Self {
        OrderItem {
            product_id: Snowflake::new(model.product_id),
            name: model.name,
            unit_price: model.unit_price,
            quantity: model.quantity,
        }
    }
}

/// Assemble an order from its row and its line rows
pub fn order_with_items(model: OrderModel, items: Vec<OrderItemModel>) -> Order {
    Order {
        id: Snowflake::new(model.id),
        customer_id: Snowflake::new(model.customer_id),
        items: items.into_iter().map(OrderItem::from).collect(),
        total: model.total,
        status: model.status.parse().unwrap_or(OrderStatus::Pendente),
        shipping_address: ShippingAddress {
            street: model.shipping_street,
            city: model.shipping_city,
            postal_code: model.shipping_postal_code,
        },
        is_deleted: model.is_deleted,
        ordered_at: model.ordered_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl From<SalesSummaryModel> for SalesSummary {
    fn from(model: SalesSummaryModel) -> Self {
        SalesSummary {
            product_id: Snowflake::new(model.product_id),
            name: model.name,
            total_quantity_sold: model.total_quantity_sold,
            total_revenue: model.total_revenue,
        }
    }
}
