//! Limit order book matching engine for a single trading pair.
//!
//! The book accepts bids and asks for one base/quote pair, matches incoming
//! orders against resting liquidity with price-time priority (best price
//! first, FIFO within a price level), and journals every trade as an
//! execution report on both participating orders.
//!
//! Core properties:
//! - Exact decimal arithmetic throughout; no floating point
//! - Limit orders rest their residual; market orders are price-capped and
//!   return the residual to the caller
//! - Completed orders can be rolled back by replaying their execution
//!   reports as opposite-side counter-orders (best-effort, not atomic)
//! - One coarse mutex serializes all public operations
//!
//! ```
//! use matchbook::{Order, OrderBook, Side};
//! use rust_decimal_macros::dec;
//!
//! let book = OrderBook::new("BTC", "USDT");
//! book.place_limit(Order::new("1", Side::Ask, dec!(0.5), dec!(20050))).unwrap();
//!
//! let executed = book
//!     .place_limit(Order::new("2", Side::Bid, dec!(0.2), dec!(20050)))
//!     .unwrap();
//! assert_eq!(executed, 1);
//! assert_eq!(book.best_ask(), Some(dec!(20050)));
//! ```

pub mod model;

pub use model::{
    BookSnapshot, DepthLevel, ExecutionReport, Order, OrderBook, OrderBookError, OrderId, Side,
};
