//! Command and side types for the matching engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order rests on.
///
/// The best bid is the highest resting buy price; the best ask is the
/// lowest resting sell price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy side.
    Bid,
    /// Sell side.
    Ask,
}

impl Side {
    /// The side an incoming order of this side matches against.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// A new-order command submitted to the engine.
///
/// Prices are unsigned integers in minimum-tick units; there is no
/// floating-point anywhere on the trading path. `timestamp` and `symbol`
/// are recorded on the resting order and echoed into events, but the engine
/// never interprets them: timestamps are caller-assigned and the book
/// serves exactly one instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCommand {
    /// Unique order id. Uniqueness over the book's lifetime is the caller's
    /// contract; the engine rejects ids that collide with a resting order.
    pub id: u64,
    /// Buy or sell.
    pub side: Side,
    /// Limit price in tick units. Must be positive.
    pub price: u64,
    /// Order quantity. Zero is rejected.
    pub size: u64,
    /// Opaque account handle. The engine does not block self-crossing;
    /// callers that disallow it must filter upstream.
    pub uid: u64,
    /// Caller-assigned timestamp, echoed into trade events.
    pub timestamp: u64,
    /// Caller-maintained instrument tag; the engine does not dispatch on it.
    pub symbol: u32,
}

impl OrderCommand {
    /// Builds a command with zeroed `uid`, `timestamp` and `symbol`.
    #[must_use]
    pub fn new(id: u64, side: Side, price: u64, size: u64) -> Self {
        OrderCommand {
            id,
            side,
            price,
            size,
            uid: 0,
            timestamp: 0,
            symbol: 0,
        }
    }
}
