use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use crate::model::{ExecutionReport, Order, OrderBookError, PriceLevel, Side};

/// Ordering key for one side's price index.
///
/// Bid keys compare in descending price order, so in-order traversal of the
/// map visits the best price first on either side.
#[derive(Debug, Clone, Copy)]
struct PriceKey {
    price: Decimal,
    descending: bool,
}

impl PriceKey {
    fn new(price: Decimal, descending: bool) -> Self {
        Self { price, descending }
    }
}

impl PartialEq for PriceKey {
    fn eq(&self, other: &Self) -> bool {
        self.price.eq(&other.price)
    }
}

impl Eq for PriceKey {}

impl PartialOrd for PriceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.descending {
            other.price.cmp(&self.price)
        } else {
            self.price.cmp(&other.price)
        }
    }
}

/// Aggregate view of one price level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: Decimal,
    pub amount: Decimal,
    pub orders: usize,
}

/// Outcome of matching one incoming order against a side.
#[derive(Debug)]
pub struct MatchResult {
    /// Quantity the side could not satisfy.
    pub amount_left: Decimal,
    /// Number of execution reports produced.
    pub orders_executed: usize,
    /// Resting orders fully consumed by the walk, in execution order.
    pub(crate) completed: Vec<Order>,
    /// The at-most-one resting order left partially filled.
    pub(crate) reduced: Option<Order>,
}

/// One side of the book: a price-sorted index of FIFO levels.
#[derive(Debug)]
pub struct OrderSide {
    levels: BTreeMap<PriceKey, PriceLevel>,
    side: Side,
}

impl OrderSide {
    pub fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            side,
        }
    }

    fn key(&self, price: Decimal) -> PriceKey {
        PriceKey::new(price, self.side == Side::Bid)
    }

    /// The most competitive resting price: lowest ask, highest bid.
    pub fn best_price(&self) -> Option<Decimal> {
        self.levels.keys().next().map(|key| key.price)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Per-level aggregates, best price first.
    pub fn depth(&self) -> Vec<DepthLevel> {
        self.levels
            .values()
            .map(|level| DepthLevel {
                price: level.price(),
                amount: level.total_amount(),
                orders: level.len(),
            })
            .collect()
    }

    /// Rests an order at the tail of its price level, creating the level
    /// when this price is new to the side.
    pub fn add_order(&mut self, order: Order) -> Result<(), OrderBookError> {
        let key = self.key(order.price);
        match self.levels.get_mut(&key) {
            Some(level) => {
                level.add_amount(order.amount)?;
                level.push_back(order);
            }
            None => {
                let mut level = PriceLevel::new(order.price, order.amount);
                level.push_back(order);
                self.levels.insert(key, level);
            }
        }
        Ok(())
    }

    /// Matches an incoming opposite-side order against this side.
    ///
    /// Walks levels best-price-first and each queue oldest-first, emitting
    /// an execution report to both participants per trade; the resting
    /// order's price is the execution price. Emptied levels leave the index
    /// after the walk. On an arithmetic error the walk aborts with state
    /// already mutated; the caller must treat the book as compromised.
    pub fn execute_order(&mut self, incoming: &mut Order) -> Result<MatchResult, OrderBookError> {
        let mut amount_left = incoming.amount;
        let mut orders_executed = 0;
        let mut completed = Vec::new();
        let mut reduced = None;
        let mut drained = Vec::new();

        for (&key, level) in self.levels.iter_mut() {
            if amount_left.is_zero() || !incoming.crosses(level.price()) {
                break;
            }

            while !amount_left.is_zero() {
                let Some(mut resting) = level.pop_front() else {
                    break;
                };

                let take = resting.amount.min(amount_left);
                let report = ExecutionReport {
                    initiator_order_id: incoming.order_id.clone(),
                    executor_order_id: resting.order_id.clone(),
                    amount: take,
                    price: resting.price,
                };
                incoming.executions.push(report.clone());
                resting.executions.push(report);

                amount_left = amount_left
                    .checked_sub(take)
                    .ok_or(OrderBookError::Arithmetic)?;
                level.sub_amount(take)?;
                orders_executed += 1;
                debug!(
                    "filled resting order {} for {} at {}",
                    resting.order_id, take, resting.price
                );

                if take == resting.amount {
                    completed.push(resting);
                } else {
                    // amount_left is zero here: the head outlasted the
                    // incoming order and stays at the front of the queue.
                    resting.amount = resting
                        .amount
                        .checked_sub(take)
                        .ok_or(OrderBookError::Arithmetic)?;
                    reduced = Some(resting.clone());
                    level.push_front(resting);
                }
            }

            if level.is_empty() {
                drained.push(key);
            }
        }

        for key in drained {
            self.levels.remove(&key);
        }

        Ok(MatchResult {
            amount_left,
            orders_executed,
            completed,
            reduced,
        })
    }
}

impl Display for OrderSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "prices:")?;
        for level in self.levels.values() {
            write!(
                f,
                "`{}` orders with price: `{}` with amount: `{}`.",
                level.len(),
                level.price(),
                level.total_amount(),
            )?;
        }
        Ok(())
    }
}
