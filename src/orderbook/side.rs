//! One side of the book: a price tree, a best-price cursor and a count.

use crate::art::{ArtConfig, LongArt};

use super::types::Side;

/// Per-side state. The tree maps price to a bucket-arena slot; `best` is a
/// constant-time hint that always agrees with the tree's extreme while the
/// side is non-empty.
pub(crate) struct SideBook {
    pub side: Side,
    pub tree: LongArt<u32>,
    pub best: Option<u64>,
    /// Resting orders on this side.
    pub order_count: u64,
}

impl SideBook {
    pub(crate) fn new(side: Side, config: ArtConfig) -> Self {
        SideBook {
            side,
            tree: LongArt::with_config(config),
            best: None,
            order_count: 0,
        }
    }

    /// Bucket slot at `price`. The price must be present; a miss means the
    /// cursor and the tree have diverged, which is unrecoverable.
    pub(crate) fn bucket_at(&self, price: u64) -> u32 {
        self.tree.get(price).copied().unwrap_or_else(|| {
            panic!(
                "{} cursor points at price {price} with no bucket",
                self.side
            )
        })
    }

    /// Re-derives the cursor from the tree after a level vanished: max key
    /// for bids, min key for asks.
    pub(crate) fn repair_best(&mut self) {
        self.best = match self.side {
            Side::Bid => self.tree.last_key_value().map(|(price, _)| price),
            Side::Ask => self.tree.first_key_value().map(|(price, _)| price),
        };
    }

    /// Moves the cursor onto `price` when it is more extreme than the
    /// current best, or when the side was empty.
    pub(crate) fn advance_best(&mut self, price: u64) {
        let better = match (self.best, self.side) {
            (None, _) => true,
            (Some(best), Side::Bid) => price > best,
            (Some(best), Side::Ask) => price < best,
        };
        if better {
            self.best = Some(price);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_best_tracks_extremes() {
        let mut bids = SideBook::new(Side::Bid, ArtConfig::default());
        bids.advance_best(100);
        bids.advance_best(90);
        assert_eq!(bids.best, Some(100));
        bids.advance_best(110);
        assert_eq!(bids.best, Some(110));

        let mut asks = SideBook::new(Side::Ask, ArtConfig::default());
        asks.advance_best(100);
        asks.advance_best(110);
        assert_eq!(asks.best, Some(100));
        asks.advance_best(90);
        assert_eq!(asks.best, Some(90));
    }

    #[test]
    fn repair_best_reads_tree_extreme() {
        let mut asks = SideBook::new(Side::Ask, ArtConfig::default());
        asks.tree.put(105, 0);
        asks.tree.put(101, 1);
        asks.tree.put(103, 2);
        asks.repair_best();
        assert_eq!(asks.best, Some(101));

        asks.tree.remove(101);
        asks.repair_best();
        assert_eq!(asks.best, Some(103));

        asks.tree.remove(103);
        asks.tree.remove(105);
        asks.repair_best();
        assert_eq!(asks.best, None);
    }

    #[test]
    #[should_panic(expected = "no bucket")]
    fn desynchronized_cursor_is_fatal() {
        let side = SideBook::new(Side::Ask, ArtConfig::default());
        side.bucket_at(100);
    }
}
