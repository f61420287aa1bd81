//! The matching core: duplicate check, cross loop, residual insert.

use dashmap::DashMap;
use std::sync::atomic::Ordering;
use tracing::trace;

use super::arena::{Bucket, NIL, OrderArena};
use super::book::OrderBook;
use super::trade::{EventSink, RejectEvent, RejectReason, TradeEvent};
use super::types::{OrderCommand, Side};

impl<S: EventSink> OrderBook<S> {
    /// Submits a new order. This is the engine's hot path.
    ///
    /// The command is checked against the order index, crossed against the
    /// opposite side under strict price/time priority, and any residual
    /// rests on its own side. All outcomes are reported through the event
    /// sink: one `Trade` per maker touched (in fill order), or exactly one
    /// `Reject` with the book untouched.
    ///
    /// A crossed level that empties mid-call is removed from its tree, its
    /// bucket returns to the pool, and the best-price cursor is repaired
    /// from the tree extreme, so cross-through to the next level happens
    /// within the same call.
    ///
    /// # Panics
    /// A zero price is a contract violation and aborts (zero *size* is the
    /// recoverable `InvalidSize` rejection). Internal invariant violations
    /// (a best cursor pointing at a missing bucket) also abort: the engine
    /// never continues on corrupted state.
    pub fn new_order(&mut self, cmd: &OrderCommand) {
        assert!(cmd.price > 0, "order {} carries a zero price", cmd.id);

        if self.order_index.contains_key(&cmd.id) {
            trace!("order {} rejected: duplicate id", cmd.id);
            self.sink.on_reject(RejectEvent {
                id: cmd.id,
                reason: RejectReason::DuplicateId,
            });
            return;
        }
        if cmd.size == 0 {
            trace!("order {} rejected: zero size", cmd.id);
            self.sink.on_reject(RejectEvent {
                id: cmd.id,
                reason: RejectReason::InvalidSize,
            });
            return;
        }

        let OrderBook {
            bids,
            asks,
            orders,
            buckets,
            order_index,
            sink,
            last_trade_price,
            has_traded,
            ..
        } = self;
        let (same, opposite) = match cmd.side {
            Side::Bid => (bids, asks),
            Side::Ask => (asks, bids),
        };

        let mut remaining = cmd.size;
        while remaining > 0 {
            let Some(best) = opposite.best else { break };
            let crossable = match cmd.side {
                Side::Bid => best <= cmd.price,
                Side::Ask => best >= cmd.price,
            };
            if !crossable {
                break;
            }

            let bucket_idx = opposite.bucket_at(best);
            let bucket = buckets.get_mut(bucket_idx);
            let filled = Self::consume_bucket(
                bucket,
                orders,
                order_index,
                sink,
                cmd,
                remaining,
                &mut opposite.order_count,
            );
            debug_assert!(filled > 0, "crossable level produced no fill");
            remaining -= filled;
            last_trade_price.store(best);
            has_traded.store(true, Ordering::Relaxed);

            if bucket.order_count == 0 {
                opposite.tree.remove(best);
                buckets.release(bucket_idx);
                opposite.repair_best();
            } else {
                debug_assert_eq!(remaining, 0);
            }
        }

        if remaining > 0 {
            let bucket_idx = match same.tree.get(cmd.price) {
                Some(&idx) => idx,
                None => {
                    let idx = buckets.acquire(cmd.price);
                    same.tree.put(cmd.price, idx);
                    idx
                }
            };
            let order_idx = orders.acquire(cmd, remaining);
            buckets.get_mut(bucket_idx).push_back(orders, order_idx);
            order_index.insert(cmd.id, order_idx);
            same.order_count += 1;
            same.advance_best(cmd.price);
            trace!(
                "order {} resting: {} {} @ {}",
                cmd.id, cmd.side, remaining, cmd.price
            );
        }
    }

    /// Fills from the bucket head until the budget or the bucket is
    /// exhausted, emitting one trade per maker touched. Fully filled makers
    /// leave the index and return to the arena. Returns the filled total.
    ///
    /// An associated function with explicit components so the caller can
    /// keep disjoint borrows on the rest of the book.
    #[allow(clippy::too_many_arguments)]
    fn consume_bucket(
        bucket: &mut Bucket,
        orders: &mut OrderArena,
        order_index: &DashMap<u64, u32>,
        sink: &mut S,
        cmd: &OrderCommand,
        budget: u64,
        resting_count: &mut u64,
    ) -> u64 {
        let mut left = budget;
        while left > 0 && bucket.head != NIL {
            let head = bucket.head;
            let (maker_id, fill, emptied) = {
                let maker = orders.get_mut(head);
                let fill = maker.remaining.min(left);
                maker.remaining -= fill;
                (maker.id, fill, maker.remaining == 0)
            };
            bucket.total_volume -= fill;
            left -= fill;
            sink.on_trade(TradeEvent {
                maker_id,
                taker_id: cmd.id,
                price: bucket.price,
                size: fill,
                taker_side: cmd.side,
                timestamp: cmd.timestamp,
            });
            if emptied {
                bucket.unlink(orders, head);
                order_index.remove(&maker_id);
                orders.release(head);
                *resting_count -= 1;
            }
        }
        budget - left
    }
}
