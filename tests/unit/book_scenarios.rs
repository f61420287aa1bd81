//! End-to-end book scenarios: deep sweeps, tiny pool configurations and
//! interleaved cancel/replace flow.

use artbook_rs::{
    ArtConfig, BookConfig, NodePoolConfig, OrderBook, OrderCommand, RecordingSink,
    ShrinkThresholds, Side,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(id: u64, side: Side, price: u64, size: u64) -> OrderCommand {
        OrderCommand::new(id, side, price, size)
    }

    #[test]
    fn deep_ladder_sweep_crosses_many_levels() {
        let mut book = OrderBook::with_sink("SWEEP", RecordingSink::new());
        for i in 0..100u64 {
            book.new_order(&cmd(i + 1, Side::Ask, 1_000 + i, 2));
        }
        assert_eq!(book.level_count(Side::Ask), 100);

        // sweeps the first fifty levels exactly
        book.new_order(&cmd(500, Side::Bid, 1_049, 100));
        assert_eq!(book.sink().trades.len(), 50);
        assert_eq!(book.best_ask(), Some((1_050, 2)));
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.level_count(Side::Ask), 50);

        let prices: Vec<u64> = book.sink().trades.iter().map(|t| t.price).collect();
        let mut sorted = prices.clone();
        sorted.sort_unstable();
        assert_eq!(prices, sorted, "fills must walk prices best-first");
        book.validate_invariants();
    }

    #[test]
    fn tiny_pools_fall_back_to_fresh_allocation() {
        let config = BookConfig {
            art: ArtConfig {
                pool: NodePoolConfig {
                    n4: 1,
                    n16: 1,
                    n48: 1,
                    n256: 1,
                },
                shrink: ShrinkThresholds::default(),
            },
            order_pool: 2,
            bucket_pool: 1,
        };
        let mut book = OrderBook::with_config("TINY", config);
        for i in 0..64u64 {
            book.new_order(&cmd(i + 1, Side::Bid, 100 + i, 1 + i % 5));
        }
        assert_eq!(book.level_count(Side::Bid), 64);
        assert_eq!(book.order_count(), 64);
        book.validate_invariants();

        for i in 0..64u64 {
            assert!(book.cancel(i + 1));
        }
        assert!(book.is_empty());
        book.validate_invariants();
    }

    #[test]
    fn cancel_replace_flow_keeps_the_book_consistent() {
        let mut book = OrderBook::with_sink("CXR", RecordingSink::new());
        book.new_order(&cmd(1, Side::Bid, 99, 10));
        book.new_order(&cmd(2, Side::Ask, 101, 10));

        // reprice the bid upward: cancel, then resubmit tighter
        assert!(book.cancel(1));
        book.new_order(&cmd(3, Side::Bid, 100, 10));
        assert_eq!(book.best_bid(), Some((100, 10)));
        assert_eq!(book.spread(), Some(1));
        book.validate_invariants();

        // an ask that crosses the replacement
        book.new_order(&cmd(4, Side::Ask, 100, 10));
        assert_eq!(book.sink().trades.len(), 1);
        assert_eq!(book.sink().trades[0].maker_id, 3);
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), Some((101, 10)));
        book.validate_invariants();
    }

    #[test]
    fn far_apart_prices_share_one_book() {
        let mut book = OrderBook::new("FAR");
        book.new_order(&cmd(1, Side::Bid, 1, 5));
        book.new_order(&cmd(2, Side::Bid, u64::MAX / 2, 5));
        book.new_order(&cmd(3, Side::Ask, u64::MAX - 1, 5));

        assert_eq!(book.best_bid(), Some((u64::MAX / 2, 5)));
        assert_eq!(book.best_ask(), Some((u64::MAX - 1, 5)));
        book.validate_invariants();

        // a bid at the very top sweeps the lone ask and rests
        book.new_order(&cmd(4, Side::Bid, u64::MAX - 1, 8));
        assert_eq!(book.best_bid(), Some((u64::MAX - 1, 3)));
        assert_eq!(book.best_ask(), None);
        book.validate_invariants();
    }

    #[test]
    fn repeated_drain_and_refill_recycles_levels() {
        let mut book = OrderBook::with_sink("CYCLE", RecordingSink::new());
        let mut id = 0u64;
        for round in 0..20u64 {
            for i in 0..10u64 {
                id += 1;
                book.new_order(&cmd(id, Side::Ask, 200 + i, 3));
            }
            id += 1;
            // drain the whole side
            book.new_order(&cmd(id, Side::Bid, 300, 30));
            assert_eq!(book.best_ask(), None, "round {round} left asks behind");
            assert_eq!(book.best_bid(), None, "round {round} left a residual bid");
            book.validate_invariants();
        }
        assert_eq!(book.sink().trades.len(), 20 * 10);
    }
}
