use log::{debug, info};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{DepthLevel, MatchResult, Order, OrderBookError, OrderId, OrderSide, Side};

/// Where a live order rests: its side and price level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLocation {
    pub side: Side,
    pub price: Decimal,
}

/// Point-in-time aggregate view of both sides, best prices first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub base_asset: String,
    pub quote_asset: String,
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

/// A synchronized limit order book for a single trading pair.
///
/// All public operations serialize on one coarse mutex; matching runs
/// straight-line under the lock and never suspends. Operations are
/// linearizable in lock-acquisition order.
#[derive(Debug)]
pub struct OrderBook {
    base_asset: String,
    quote_asset: String,
    state: Mutex<BookState>,
}

#[derive(Debug)]
struct BookState {
    asks: OrderSide,
    bids: OrderSide,
    /// Resting orders by id, for duplicate detection and fill bookkeeping.
    live: HashMap<OrderId, OrderLocation>,
    /// Journal of completed orders, consumed by rollback.
    done: HashMap<OrderId, Order>,
    replay_seq: u64,
}

impl OrderBook {
    pub fn new(base_asset: impl Into<String>, quote_asset: impl Into<String>) -> Self {
        let base_asset = base_asset.into();
        let quote_asset = quote_asset.into();
        info!("creating order book for pair {}-{}", base_asset, quote_asset);

        Self {
            base_asset,
            quote_asset,
            state: Mutex::new(BookState {
                asks: OrderSide::new(Side::Ask),
                bids: OrderSide::new(Side::Bid),
                live: HashMap::new(),
                done: HashMap::new(),
                replay_seq: 0,
            }),
        }
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    /// Places a limit order: executes whatever crosses the opposite side,
    /// then rests the remainder. Returns the number of executions.
    pub fn place_limit(&self, order: Order) -> Result<usize, OrderBookError> {
        self.state.lock().limit_order(order)
    }

    /// Places a price-capped market order: executes up to the order's
    /// price, never crossing past it, and returns
    /// `(orders_executed, amount_left)`. The residual is handed back to
    /// the caller rather than rested.
    pub fn place_market(&self, order: Order) -> Result<(usize, Decimal), OrderBookError> {
        self.state.lock().market_order(order)
    }

    /// Replays a completed order's execution reports as opposite-side
    /// limit orders, then drops the order from the journal.
    ///
    /// This is a best-effort compensating action, not a transactional
    /// undo: the counter-orders match against whatever liquidity is live
    /// now, and a mid-replay failure leaves the book partially restored
    /// with the journal entry still present.
    pub fn rollback(&self, order_id: &OrderId) -> Result<(), OrderBookError> {
        self.state.lock().rollback(order_id)
    }

    /// Diagnostic rendering of one side's price levels.
    pub fn render_side(&self, side: Side) -> String {
        let state = self.state.lock();
        match side {
            Side::Ask => state.asks.to_string(),
            Side::Bid => state.bids.to_string(),
        }
    }

    /// Per-level aggregates of one side, best price first.
    pub fn depth(&self, side: Side) -> Vec<DepthLevel> {
        let state = self.state.lock();
        match side {
            Side::Ask => state.asks.depth(),
            Side::Bid => state.bids.depth(),
        }
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.state.lock().asks.best_price()
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.state.lock().bids.best_price()
    }

    pub fn snapshot(&self) -> BookSnapshot {
        let state = self.state.lock();
        BookSnapshot {
            base_asset: self.base_asset.clone(),
            quote_asset: self.quote_asset.clone(),
            asks: state.asks.depth(),
            bids: state.bids.depth(),
        }
    }

    /// Number of orders currently resting in the book.
    pub fn open_order_count(&self) -> usize {
        self.state.lock().live.len()
    }

    /// The journaled state of a completed order, while it remains
    /// rollback-eligible.
    pub fn completed(&self, order_id: &OrderId) -> Option<Order> {
        self.state.lock().done.get(order_id).cloned()
    }
}

impl BookState {
    fn limit_order(&mut self, mut order: Order) -> Result<usize, OrderBookError> {
        validate(&order)?;
        if self.live.contains_key(&order.order_id) {
            return Err(OrderBookError::DuplicateOrder(order.order_id));
        }

        let to_match = match order.side {
            Side::Ask => &mut self.bids,
            Side::Bid => &mut self.asks,
        };
        let MatchResult {
            amount_left,
            orders_executed,
            completed,
            reduced,
        } = to_match.execute_order(&mut order)?;
        self.settle_executors(completed, reduced);

        if amount_left.is_zero() {
            debug!(
                "limit order {} fully filled by {} executions",
                order.order_id, orders_executed
            );
            self.done.insert(order.order_id.clone(), order);
            return Ok(orders_executed);
        }

        debug!(
            "resting limit order {} for {} at {}",
            order.order_id, amount_left, order.price
        );
        order.amount = amount_left;
        let location = OrderLocation {
            side: order.side,
            price: order.price,
        };
        let to_rest = match order.side {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        };
        to_rest.add_order(order.clone())?;
        self.live.insert(order.order_id.clone(), location);
        self.done.insert(order.order_id.clone(), order);

        Ok(orders_executed)
    }

    fn market_order(&mut self, mut order: Order) -> Result<(usize, Decimal), OrderBookError> {
        if order.amount <= Decimal::ZERO {
            return Err(OrderBookError::InvalidAmount(order.amount));
        }

        let to_match = match order.side {
            Side::Ask => &mut self.bids,
            Side::Bid => &mut self.asks,
        };
        let MatchResult {
            amount_left,
            orders_executed,
            completed,
            reduced,
        } = to_match.execute_order(&mut order)?;
        self.settle_executors(completed, reduced);

        debug!(
            "market order {} executed {} times, {} returned to the caller",
            order.order_id, orders_executed, amount_left
        );
        self.done.insert(order.order_id.clone(), order);

        Ok((orders_executed, amount_left))
    }

    /// Fully consumed executors leave the live index; a partially consumed
    /// one stays resting. Either way the journal entry is refreshed so it
    /// carries the executor's accumulated reports.
    fn settle_executors(&mut self, completed: Vec<Order>, reduced: Option<Order>) {
        for executor in completed {
            self.live.remove(&executor.order_id);
            self.done.insert(executor.order_id.clone(), executor);
        }
        if let Some(survivor) = reduced {
            self.done.insert(survivor.order_id.clone(), survivor);
        }
    }

    fn rollback(&mut self, order_id: &OrderId) -> Result<(), OrderBookError> {
        let order = self
            .done
            .get(order_id)
            .cloned()
            .ok_or_else(|| OrderBookError::NotFound(order_id.clone()))?;
        let reverse_side = !order.side;
        info!(
            "rolling back order {} by replaying {} executions",
            order_id,
            order.executions.len()
        );

        for report in &order.executions {
            // Replay ids are minted fresh: the executor may still rest in
            // the book under its original id after a partial fill.
            self.replay_seq += 1;
            let replay_id = OrderId(format!("{}#r{}", report.executor_order_id, self.replay_seq));
            let counter = Order::new(replay_id, reverse_side, report.amount, report.price);
            self.limit_order(counter)
                .map_err(|err| OrderBookError::Rollback {
                    order_id: order_id.clone(),
                    source: Box::new(err),
                })?;
        }

        self.done.remove(order_id);
        Ok(())
    }
}

fn validate(order: &Order) -> Result<(), OrderBookError> {
    if order.amount <= Decimal::ZERO {
        return Err(OrderBookError::InvalidAmount(order.amount));
    }
    if order.price <= Decimal::ZERO {
        return Err(OrderBookError::InvalidPrice(order.price));
    }
    Ok(())
}
