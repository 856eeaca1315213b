pub use book::{BookSnapshot, OrderBook, OrderLocation};
pub use error::OrderBookError;
pub use order::{ExecutionReport, Order, OrderId};
pub use order_side::{DepthLevel, MatchResult, OrderSide};
pub use price_level::PriceLevel;
pub use side::Side;

mod book;
mod error;
mod order;
mod order_side;
mod price_level;
mod side;
