use matchbook::{Order, OrderBook, Side};
use rust_decimal_macros::dec;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The standard fixture:
///
/// ```text
/// ASK:
///      2 BTC 20150 USDT
///      1 BTC (0.3+0.5+0.2) 20100 USDT
///      1 BTC (0.3+0.5+0.2) 20050 USDT
///
/// --- incoming orders land here ---
///
/// BID:
///      1 BTC (0.3+0.5+0.2) 20000 USDT
///      1 BTC (0.3+0.5+0.2) 19900 USDT
///      2 BTC 19850 USDT
/// ```
pub fn fixture_orders() -> Vec<Order> {
    vec![
        Order::new("1", Side::Ask, dec!(0.3), dec!(20050)),
        Order::new("11", Side::Ask, dec!(0.5), dec!(20050)),
        Order::new("111", Side::Ask, dec!(0.2), dec!(20050)),
        Order::new("2", Side::Ask, dec!(0.3), dec!(20100)),
        Order::new("22", Side::Ask, dec!(0.5), dec!(20100)),
        Order::new("222", Side::Ask, dec!(0.2), dec!(20100)),
        Order::new("3", Side::Ask, dec!(2), dec!(20150)),
        Order::new("4", Side::Bid, dec!(0.3), dec!(20000)),
        Order::new("44", Side::Bid, dec!(0.5), dec!(20000)),
        Order::new("444", Side::Bid, dec!(0.2), dec!(20000)),
        Order::new("5", Side::Bid, dec!(0.3), dec!(19900)),
        Order::new("55", Side::Bid, dec!(0.5), dec!(19900)),
        Order::new("555", Side::Bid, dec!(0.2), dec!(19900)),
        Order::new("6", Side::Bid, dec!(2), dec!(19850)),
    ]
}

pub fn fixture_book() -> OrderBook {
    let book = OrderBook::new("BTC", "USDT");
    for order in fixture_orders() {
        book.place_limit(order).expect("fixture order should rest");
    }
    book
}
