//! # ART-Backed Limit Order Book Matching Engine
//!
//! A single-instrument limit order book built on a specialized ordered map:
//! a 64-bit-keyed **adaptive radix tree** with fixed-width path compression
//! and pooled node allocation. The crate exists to pit that tree against
//! the ordered-map baselines of the ecosystem on real matching workloads,
//! so the two cores are deliberately small and allocation-free on the hot
//! path:
//!
//! - [`LongArt`]: an ordered mapping `u64 -> V` over adaptive node
//!   variants (fanout 4, 16, 48 and 256) that grow and shrink into each
//!   other. Lookups cost at most eight byte steps, and every descent step
//!   can bail out early on a compressed-prefix mismatch.
//! - [`OrderBook`]: a price/time-priority matching engine that keeps one
//!   `LongArt` per side (price → bucket), per-price FIFO buckets threaded
//!   through a pooled order arena, an order-id index for duplicate
//!   rejection and cancels, and constant-time best-price cursors repaired
//!   from the tree extremes when a level empties.
//!
//! ## Design
//!
//! 1. **Single-writer**: each book is a run-to-completion state machine.
//!    There are no locks, no background threads and no suspension points;
//!    an outer layer serializes access if several producers exist.
//! 2. **Pooled allocation**: tree nodes, orders and buckets all come from
//!    bounded per-instance free lists. Fresh allocation happens only when
//!    a free list runs dry; excess frees drop to the allocator.
//! 3. **Events over results**: recoverable outcomes (fills, duplicate ids,
//!    zero sizes) are reported through a narrow [`EventSink`]; internal
//!    invariant violations abort rather than continue on corrupted state.
//! 4. **Integer prices**: prices are unsigned tick counts. Nothing on the
//!    trading path touches floating point.
//!
//! ## Example
//!
//! ```
//! use artbook_rs::{OrderBook, OrderCommand, RecordingSink, Side};
//!
//! let mut book = OrderBook::with_sink("BTC/USD", RecordingSink::new());
//!
//! // a resting ask, then a bid that crosses it
//! book.new_order(&OrderCommand::new(1, Side::Ask, 100, 10));
//! book.new_order(&OrderCommand::new(2, Side::Bid, 100, 4));
//!
//! let trade = &book.sink().trades[0];
//! assert_eq!((trade.maker_id, trade.taker_id), (1, 2));
//! assert_eq!((trade.price, trade.size), (100, 4));
//!
//! // the remainder of the ask is still resting
//! assert_eq!(book.best_ask(), Some((100, 6)));
//! ```
//!
//! ## Scope
//!
//! The crate is memory-only and single-symbol by design: no persistence,
//! no network ingress, no risk checks, and no iteration or range scans
//! over the tree (the engine needs best-of-side and point operations
//! only). The criterion benches compare [`LongArt`] against
//! `std::collections::BTreeMap` as the red-black-tree-class baseline.

pub mod art;
pub mod orderbook;

pub mod prelude;
mod utils;

pub use art::{ArtConfig, LongArt, NodeCensus, NodePoolConfig, PoolStats, ShrinkThresholds};
pub use orderbook::{
    BookConfig, EventSink, NoopSink, OrderBook, OrderCommand, RecordingSink, RejectEvent,
    RejectReason, RestingOrder, Side, TradeEvent,
};
pub use utils::current_time_millis;

/// Default type alias for a book that discards its events.
///
/// Use this when only the resulting book state matters, e.g. when
/// pre-filling a book for a benchmark.
pub type DefaultOrderBook = OrderBook<NoopSink>;
