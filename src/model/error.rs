use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::OrderId;

/// Errors surfaced by the public order book operations.
///
/// `DuplicateOrder`, `NotFound`, `InvalidAmount` and `InvalidPrice` are
/// detected before any mutation. `Arithmetic` can fire mid-matching and
/// leaves the book partially mutated; treat it as fatal to book consistency.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    #[error("order: {0} already exists")]
    DuplicateOrder(OrderId),

    #[error("order: {0} not found - nothing to rollback")]
    NotFound(OrderId),

    #[error("order amount must be positive, got: {0}")]
    InvalidAmount(Decimal),

    #[error("order price must be positive, got: {0}")]
    InvalidPrice(Decimal),

    #[error("decimal arithmetic failed while updating the book")]
    Arithmetic,

    /// A synthetic replay order failed mid-rollback. The book is left
    /// partially restored and the rolled-back order stays in the journal.
    #[error("rollback of order {order_id} failed: {source}")]
    Rollback {
        order_id: OrderId,
        source: Box<OrderBookError>,
    },
}
