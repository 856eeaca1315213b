use rust_decimal::Decimal;
use std::collections::VecDeque;

use crate::model::{Order, OrderBookError};

/// All resting orders on one side at one exact price.
///
/// `total_amount` always equals the sum of the queued orders' amounts; the
/// queue is strictly first-in-first-out. A level whose queue drains must be
/// removed from its side's index by the caller.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Decimal,
    total_amount: Decimal,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Creates a level seeded with an initial amount and an empty queue.
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self {
            price,
            total_amount: amount,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Adds resting volume to the running total.
    pub fn add_amount(&mut self, amount: Decimal) -> Result<(), OrderBookError> {
        self.total_amount = self
            .total_amount
            .checked_add(amount)
            .ok_or(OrderBookError::Arithmetic)?;
        Ok(())
    }

    /// Removes executed volume from the running total.
    pub fn sub_amount(&mut self, amount: Decimal) -> Result<(), OrderBookError> {
        self.total_amount = self
            .total_amount
            .checked_sub(amount)
            .ok_or(OrderBookError::Arithmetic)?;
        Ok(())
    }

    /// Appends a resting order at the tail of the queue.
    pub fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Restores a partially filled order to the head of the queue.
    pub fn push_front(&mut self, order: Order) {
        self.orders.push_front(order);
    }

    /// Detaches the oldest resting order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Side;
    use rust_decimal_macros::dec;

    fn resting(id: &str, amount: Decimal) -> Order {
        Order::new(id, Side::Ask, amount, dec!(20050))
    }

    #[test]
    fn should_track_the_total_across_mutations() {
        let mut level = PriceLevel::new(dec!(20050), dec!(0.3));
        level.push_back(resting("1", dec!(0.3)));

        level.add_amount(dec!(0.5)).unwrap();
        level.push_back(resting("11", dec!(0.5)));
        assert_eq!(level.total_amount(), dec!(0.8));
        assert_eq!(level.len(), 2);

        level.sub_amount(dec!(0.3)).unwrap();
        let filled = level.pop_front().unwrap();
        assert_eq!(filled.order_id, "1".into());
        assert_eq!(level.total_amount(), dec!(0.5));
        assert_eq!(level.len(), 1);
    }

    #[test]
    fn should_restore_a_partial_fill_at_the_head() {
        let mut level = PriceLevel::new(dec!(20050), dec!(0.3));
        level.push_back(resting("1", dec!(0.3)));
        level.add_amount(dec!(0.5)).unwrap();
        level.push_back(resting("11", dec!(0.5)));

        let mut head = level.pop_front().unwrap();
        head.amount = dec!(0.2);
        level.sub_amount(dec!(0.1)).unwrap();
        level.push_front(head);

        assert_eq!(level.front().unwrap().order_id, "1".into());
        assert_eq!(level.front().unwrap().amount, dec!(0.2));
        assert_eq!(level.total_amount(), dec!(0.7));
    }

    #[test]
    fn should_surface_arithmetic_overflow() {
        let mut level = PriceLevel::new(dec!(20050), Decimal::MAX);
        assert_eq!(
            level.add_amount(Decimal::MAX),
            Err(OrderBookError::Arithmetic)
        );
    }
}
