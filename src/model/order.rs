use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::Side;

/// Opaque caller-supplied order identifier, unique among live orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Record of one trade between two orders.
///
/// The price is always the resting order's price: the passive side of a
/// match sets the execution price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub initiator_order_id: OrderId,
    pub executor_order_id: OrderId,
    pub amount: Decimal,
    pub price: Decimal,
}

/// An order in the book.
///
/// `amount` only ever decreases while matching; once the order rests, it
/// holds the remaining resting quantity. `created_at` is diagnostic only:
/// time priority is the position in the price-level queue, not the
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
    pub created_at: u128,
    pub executions: Vec<ExecutionReport>,
}

impl Order {
    pub fn new(order_id: impl Into<OrderId>, side: Side, amount: Decimal, price: Decimal) -> Self {
        let now = SystemTime::now();
        let created_at = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self {
            order_id: order_id.into(),
            side,
            amount,
            price,
            created_at,
            executions: Vec::new(),
        }
    }

    /// Whether this order's price crosses a level on the opposite side.
    pub fn crosses(&self, level_price: Decimal) -> bool {
        match self.side {
            Side::Bid => self.price >= level_price,
            Side::Ask => self.price <= level_price,
        }
    }
}
