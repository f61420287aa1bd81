//! Trade and reject events, and the sink they flow into.
//!
//! The matching core reports every recoverable outcome through
//! [`EventSink`]; nothing recoverable ever surfaces through a return type.
//! Within one `new_order` call trades are emitted in exact fill order, and
//! the single-writer discipline makes events globally ordered across calls.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::Side;

/// One fill between a resting maker and the incoming taker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Id of the resting order that was hit.
    pub maker_id: u64,
    /// Id of the incoming order.
    pub taker_id: u64,
    /// Execution price; always the maker bucket's price.
    pub price: u64,
    /// Quantity exchanged in this fill.
    pub size: u64,
    /// Side of the incoming order.
    pub taker_side: Side,
    /// The taker command's caller-assigned timestamp.
    pub timestamp: u64,
}

/// Why a command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RejectReason {
    /// The id collides with an order currently resting in the book.
    DuplicateId,
    /// The command carried a zero size.
    InvalidSize,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::DuplicateId => write!(f, "duplicate order id"),
            RejectReason::InvalidSize => write!(f, "invalid order size"),
        }
    }
}

/// A rejected command. The book is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectEvent {
    /// Id of the rejected command.
    pub id: u64,
    /// Why it was rejected.
    pub reason: RejectReason,
}

/// Receiver for the engine's output events.
///
/// The default method bodies discard events, so a sink only implements the
/// callbacks it cares about.
pub trait EventSink {
    /// Called once per fill, in fill order.
    fn on_trade(&mut self, trade: TradeEvent) {
        let _ = trade;
    }

    /// Called exactly once for a rejected command.
    fn on_reject(&mut self, reject: RejectEvent) {
        let _ = reject;
    }
}

/// Sink that discards everything. The default for [`OrderBook`]
/// (`OrderBook<NoopSink>`) when only the book state matters.
///
/// [`OrderBook`]: super::OrderBook
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {}

/// Sink that buffers every event, in order. Handy for tests, demos and the
/// benches.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Buffered trades, oldest first.
    pub trades: Vec<TradeEvent>,
    /// Buffered rejects, oldest first.
    pub rejects: Vec<RejectEvent>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Drops all buffered events.
    pub fn clear(&mut self) {
        self.trades.clear();
        self.rejects.clear();
    }
}

impl EventSink for RecordingSink {
    fn on_trade(&mut self, trade: TradeEvent) {
        self.trades.push(trade);
    }

    fn on_reject(&mut self, reject: RejectEvent) {
        self.rejects.push(reject);
    }
}
