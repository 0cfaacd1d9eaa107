//! Order entity - an immutable snapshot of a checked-out cart

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Order lifecycle status
///
/// Transitions are not enforced; the usual flow is
/// Pendente -> Pago -> Enviado -> Entregue, with Cancelado at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pendente,
    Pago,
    Enviado,
    Entregue,
    Cancelado,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pendente,
        Self::Pago,
        Self::Enviado,
        Self::Entregue,
        Self::Cancelado,
    ];

    /// Statuses whose lines count as sold on the seller dashboard
    pub const SOLD: [OrderStatus; 3] = [Self::Pago, Self::Enviado, Self::Entregue];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "Pendente",
            Self::Pago => "Pago",
            Self::Enviado => "Enviado",
            Self::Entregue => "Entregue",
            Self::Cancelado => "Cancelado",
        }
    }

    /// Paid or later, and not cancelled
    #[inline]
    pub fn counts_as_sale(self) -> bool {
        Self::SOLD.contains(&self)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery address captured on the order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
}

/// Snapshot of a product line at checkout time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: Snowflake,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl OrderItem {
    #[inline]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Customer order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Snowflake,
    pub customer_id: Snowflake,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub is_deleted: bool,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order. The total is derived from the lines.
    pub fn new(
        id: Snowflake,
        customer_id: Snowflake,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
    ) -> Self {
        let now = Utc::now();
        let total = Self::compute_total(&items);
        Self {
            id,
            customer_id,
            items,
            total,
            status: OrderStatus::Pendente,
            shipping_address,
            is_deleted: false,
            ordered_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn compute_total(items: &[OrderItem]) -> Decimal {
        items.iter().map(OrderItem::subtotal).sum()
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.customer_id == user_id
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }
}
