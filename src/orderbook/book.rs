//! Core order book state: two ART-backed sides, pooled order and bucket
//! storage, and the order-id index.

use crossbeam::atomic::AtomicCell;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::trace;

use crate::art::ArtConfig;

use super::arena::{BucketArena, NIL, OrderArena};
use super::side::SideBook;
use super::trade::{EventSink, NoopSink};
use super::types::Side;

/// Book-level configuration: tree settings plus the order and bucket arena
/// capacities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Configuration shared by both side trees.
    pub art: ArtConfig,
    /// Pre-reserved order slots.
    pub order_pool: usize,
    /// Pre-reserved bucket slots.
    pub bucket_pool: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            art: ArtConfig::default(),
            order_pool: 512,
            bucket_pool: 256,
        }
    }
}

/// A read-only snapshot of one resting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    /// Order id.
    pub id: u64,
    /// Side the order rests on.
    pub side: Side,
    /// Limit price in tick units.
    pub price: u64,
    /// Unfilled quantity.
    pub remaining: u64,
    /// Opaque account handle from the submitting command.
    pub uid: u64,
    /// Caller-assigned submission timestamp.
    pub timestamp: u64,
}

/// A single-instrument limit order book with price/time priority.
///
/// The book is a single-writer state machine: every operation runs to
/// completion on the caller's thread, and all storage (tree nodes, orders,
/// buckets) is instance-owned and pooled. Recoverable outcomes flow to the
/// event sink `S`; internal invariant violations abort.
///
/// # Examples
///
/// ```
/// use artbook_rs::{OrderBook, OrderCommand, RecordingSink, Side};
///
/// let mut book = OrderBook::with_sink("BTC/USD", RecordingSink::new());
/// book.new_order(&OrderCommand::new(1, Side::Ask, 100, 10));
/// book.new_order(&OrderCommand::new(2, Side::Bid, 100, 4));
///
/// assert_eq!(book.sink().trades.len(), 1);
/// assert_eq!(book.best_ask(), Some((100, 6)));
/// assert_eq!(book.best_bid(), None);
/// ```
pub struct OrderBook<S: EventSink = NoopSink> {
    /// The symbol this book trades. Informational only.
    pub(super) symbol: String,

    /// Buy side: best is the maximum resting price.
    pub(super) bids: SideBook,

    /// Sell side: best is the minimum resting price.
    pub(super) asks: SideBook,

    /// Pooled storage for resting orders.
    pub(super) orders: OrderArena,

    /// Pooled storage for price buckets.
    pub(super) buckets: BucketArena,

    /// Order id to arena slot, for duplicate rejection and cancel.
    pub(super) order_index: DashMap<u64, u32>,

    /// Price of the most recent fill.
    pub(super) last_trade_price: AtomicCell<u64>,

    /// Whether any fill has happened yet.
    pub(super) has_traded: AtomicBool,

    /// Receiver for trade and reject events.
    pub(super) sink: S,

    config: BookConfig,
}

impl OrderBook<NoopSink> {
    /// Creates a book with the default configuration and a discarding sink.
    pub fn new(symbol: &str) -> Self {
        Self::with_sink_and_config(symbol, NoopSink, BookConfig::default())
    }

    /// Creates a book with explicit pool capacities and shrink thresholds.
    pub fn with_config(symbol: &str, config: BookConfig) -> Self {
        Self::with_sink_and_config(symbol, NoopSink, config)
    }
}

impl<S: EventSink> OrderBook<S> {
    /// Creates a book that reports events to `sink`.
    pub fn with_sink(symbol: &str, sink: S) -> Self {
        Self::with_sink_and_config(symbol, sink, BookConfig::default())
    }

    /// Creates a book with both an event sink and explicit configuration.
    pub fn with_sink_and_config(symbol: &str, sink: S, config: BookConfig) -> Self {
        OrderBook {
            symbol: symbol.to_string(),
            bids: SideBook::new(Side::Bid, config.art),
            asks: SideBook::new(Side::Ask, config.art),
            orders: OrderArena::with_capacity(config.order_pool),
            buckets: BucketArena::with_capacity(config.bucket_pool),
            order_index: DashMap::new(),
            last_trade_price: AtomicCell::new(0),
            has_traded: AtomicBool::new(false),
            sink,
            config,
        }
    }

    /// The symbol this book trades.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The configuration the book was built with.
    #[must_use]
    pub fn config(&self) -> BookConfig {
        self.config
    }

    /// Read access to the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the event sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Best bid price and the total volume resting there.
    #[must_use]
    pub fn best_bid(&self) -> Option<(u64, u64)> {
        let price = self.bids.best?;
        let bucket = self.buckets.get(self.bids.bucket_at(price));
        Some((price, bucket.total_volume))
    }

    /// Best ask price and the total volume resting there.
    #[must_use]
    pub fn best_ask(&self) -> Option<(u64, u64)> {
        let price = self.asks.best?;
        let bucket = self.buckets.get(self.asks.bucket_at(price));
        Some((price, bucket.total_volume))
    }

    /// Best ask minus best bid. `None` while either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<u64> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some(ask.saturating_sub(bid))
    }

    /// Midpoint of the best prices, in tick units (integer division; the
    /// trading path carries no floating point).
    #[must_use]
    pub fn mid_price(&self) -> Option<u64> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some((bid.saturating_add(ask)) / 2)
    }

    /// Price of the most recent fill, if any trade has happened.
    #[must_use]
    pub fn last_trade_price(&self) -> Option<u64> {
        if self.has_traded.load(Ordering::Relaxed) {
            Some(self.last_trade_price.load())
        } else {
            None
        }
    }

    /// Total resting orders across both sides.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Resting orders on one side.
    #[must_use]
    pub fn side_order_count(&self, side: Side) -> u64 {
        match side {
            Side::Bid => self.bids.order_count,
            Side::Ask => self.asks.order_count,
        }
    }

    /// Occupied price levels on one side.
    #[must_use]
    pub fn level_count(&self, side: Side) -> usize {
        match side {
            Side::Bid => self.bids.tree.len(),
            Side::Ask => self.asks.tree.len(),
        }
    }

    /// Total resting volume at an exact price, `None` when the level does
    /// not exist.
    #[must_use]
    pub fn volume_at(&self, side: Side, price: u64) -> Option<u64> {
        let book = match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        };
        let idx = *book.tree.get(price)?;
        Some(self.buckets.get(idx).total_volume)
    }

    /// Whether an order with this id is currently resting.
    #[must_use]
    pub fn contains_order(&self, id: u64) -> bool {
        self.order_index.contains_key(&id)
    }

    /// Snapshot of a resting order, `None` when the id is not resting.
    #[must_use]
    pub fn order(&self, id: u64) -> Option<RestingOrder> {
        let idx = *self.order_index.get(&id)?;
        let record = self.orders.get(idx);
        Some(RestingOrder {
            id: record.id,
            side: record.side,
            price: record.price,
            remaining: record.remaining,
            uid: record.uid,
            timestamp: record.timestamp,
        })
    }

    /// `true` when no orders rest on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.len() == 0
    }

    /// Cancels a resting order by id.
    ///
    /// Unlinks the order from its bucket in O(1); when the bucket empties,
    /// the price level leaves the side's tree and the best cursor is
    /// repaired. Returns `false` when no such order rests (already filled,
    /// already cancelled, or never admitted).
    pub fn cancel(&mut self, id: u64) -> bool {
        let Some((_, idx)) = self.order_index.remove(&id) else {
            return false;
        };
        let (side, price) = {
            let record = self.orders.get(idx);
            (record.side, record.price)
        };
        let book = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let bucket_idx = book.bucket_at(price);
        let bucket = self.buckets.get_mut(bucket_idx);
        bucket.unlink(&mut self.orders, idx);
        let emptied = bucket.order_count == 0;
        self.orders.release(idx);
        book.order_count -= 1;
        if emptied {
            book.tree.remove(price);
            self.buckets.release(bucket_idx);
            if book.best == Some(price) {
                book.repair_best();
            }
        }
        trace!("order {id} cancelled: {side} @ {price}");
        true
    }

    /// Checks every cross-structure invariant of the book and panics on the
    /// first violation. Intended for tests and debugging; cost is linear in
    /// the number of resting orders.
    pub fn validate_invariants(&self) {
        self.bids.tree.validate();
        self.asks.tree.validate();

        for side in [&self.bids, &self.asks] {
            match side.best {
                Some(best) => {
                    let extreme = match side.side {
                        Side::Bid => side.tree.last_key_value(),
                        Side::Ask => side.tree.first_key_value(),
                    };
                    let (key, &idx) = extreme.expect("cursor set over an empty tree");
                    assert_eq!(best, key, "{} cursor disagrees with tree", side.side);
                    let bucket = self.buckets.get(idx);
                    assert_eq!(bucket.price, best, "bucket price disagrees with key");
                    assert!(bucket.order_count > 0, "empty bucket at the best price");
                }
                None => {
                    assert_eq!(side.tree.len(), 0, "{} cursor lost", side.side);
                    assert_eq!(side.order_count, 0);
                }
            }
        }

        if let (Some(bid), Some(ask)) = (self.bids.best, self.asks.best) {
            assert!(bid < ask, "crossed book: {bid} >= {ask}");
        }

        assert_eq!(
            self.order_index.len(),
            self.orders.len(),
            "order index size disagrees with live orders"
        );
        assert_eq!(
            self.bids.order_count + self.asks.order_count,
            self.orders.len() as u64,
            "side counts disagree with live orders"
        );

        let mut by_level: HashMap<(Side, u64), Vec<u32>> = HashMap::new();
        for entry in self.order_index.iter() {
            let idx = *entry.value();
            let record = self.orders.get(idx);
            assert_eq!(record.id, *entry.key(), "index id disagrees with record");
            by_level.entry((record.side, record.price)).or_default().push(idx);
        }

        let bid_levels = by_level.keys().filter(|(s, _)| *s == Side::Bid).count();
        let ask_levels = by_level.keys().filter(|(s, _)| *s == Side::Ask).count();
        assert_eq!(bid_levels, self.bids.tree.len(), "bid levels disagree");
        assert_eq!(ask_levels, self.asks.tree.len(), "ask levels disagree");
        assert_eq!(bid_levels + ask_levels, self.buckets.len(), "bucket count disagrees");

        for ((side, price), mut expected) in by_level {
            let book = match side {
                Side::Bid => &self.bids,
                Side::Ask => &self.asks,
            };
            let bucket = self.buckets.get(book.bucket_at(price));
            assert_eq!(bucket.price, price);

            let mut linked = Vec::new();
            let mut volume = 0u64;
            let mut prev = NIL;
            let mut cursor = bucket.head;
            while cursor != NIL {
                let record = self.orders.get(cursor);
                assert_eq!(record.prev, prev, "broken back link at {price}");
                assert_eq!(record.side, side);
                assert_eq!(record.price, price);
                assert!(record.remaining > 0, "fully filled order still linked");
                assert_eq!(
                    self.order_index.get(&record.id).map(|e| *e.value()),
                    Some(cursor),
                    "linked order {} missing from index",
                    record.id
                );
                linked.push(cursor);
                volume += record.remaining;
                prev = cursor;
                cursor = record.next;
            }
            assert_eq!(bucket.tail, prev, "tail link disagrees at {price}");
            assert_eq!(linked.len() as u32, bucket.order_count, "count at {price}");
            assert_eq!(volume, bucket.total_volume, "volume sum at {price}");

            expected.sort_unstable();
            linked.sort_unstable();
            assert_eq!(expected, linked, "index and FIFO disagree at {price}");
        }
    }
}
