//! Prelude module that re-exports the commonly used types.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use artbook_rs::prelude::*;
//! ```

// Core engine types
pub use crate::orderbook::{BookConfig, OrderBook, OrderCommand, RestingOrder, Side};

// Event types and sinks
pub use crate::orderbook::{
    EventSink, NoopSink, RecordingSink, RejectEvent, RejectReason, TradeEvent,
};

// The adaptive radix tree and its configuration
pub use crate::art::{ArtConfig, LongArt, NodePoolConfig, ShrinkThresholds};

// Type aliases for common use cases
pub use crate::DefaultOrderBook;

// Utility functions
pub use crate::utils::current_time_millis;
