//! Law-like properties of the tree and the matching core, checked with
//! proptest against reference models.

use artbook_rs::{LongArt, NodeCensus, OrderBook, OrderCommand, RecordingSink, Side};
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn run_stream(commands: &[OrderCommand]) -> (Vec<artbook_rs::TradeEvent>, Vec<artbook_rs::RejectEvent>) {
    let mut book = OrderBook::with_sink("PROP", RecordingSink::new());
    for cmd in commands {
        book.new_order(cmd);
    }
    book.validate_invariants();
    (book.sink().trades.clone(), book.sink().rejects.clone())
}

proptest! {
    /// Insert-then-lookup: every inserted key resolves to its value, and
    /// near-miss keys resolve to absent.
    #[test]
    fn insert_then_lookup(keys in hash_set(any::<u64>(), 0..200)) {
        let mut map = LongArt::new();
        for &k in &keys {
            map.put(k, k ^ 0xA5A5_A5A5);
        }
        map.validate();
        prop_assert_eq!(map.len(), keys.len());

        for &k in &keys {
            prop_assert_eq!(map.get(k), Some(&(k ^ 0xA5A5_A5A5)));
            let probe = k.wrapping_add(1);
            if !keys.contains(&probe) {
                prop_assert_eq!(map.get(probe), None);
            }
        }
    }

    /// Insert-then-remove identity: the tree ends empty with no live nodes.
    #[test]
    fn insert_then_remove_is_identity(keys in hash_set(any::<u64>(), 1..200)) {
        let mut map = LongArt::new();
        for &k in &keys {
            map.put(k, k);
        }
        for &k in &keys {
            prop_assert_eq!(map.remove(k), Some(k));
        }
        prop_assert!(map.is_empty());
        prop_assert_eq!(map.census(), NodeCensus::default());
        map.validate();
    }

    /// Overwriting put displaces and returns the prior value.
    #[test]
    fn put_overwrite_returns_prior(key in any::<u64>(), a in any::<u32>(), b in any::<u32>()) {
        let mut map = LongArt::new();
        prop_assert_eq!(map.put(key, a), None);
        prop_assert_eq!(map.put(key, b), Some(a));
        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.get(key), Some(&b));
    }

    /// The tree agrees with `BTreeMap` on every operation, including the
    /// extremes, under mixed workloads on a collision-heavy key space.
    #[test]
    fn agrees_with_btreemap(ops in vec((any::<u8>(), any::<u64>()), 1..400)) {
        let mut map = LongArt::new();
        let mut model: BTreeMap<u64, u64> = BTreeMap::new();

        for (op, raw) in ops {
            // mostly a narrow space so removals hit, sometimes full range
            let key = if op & 0x80 == 0 { raw % 512 } else { raw };
            match op % 4 {
                0 | 1 => {
                    prop_assert_eq!(map.put(key, raw), model.insert(key, raw));
                }
                2 => {
                    prop_assert_eq!(map.remove(key), model.remove(&key));
                }
                _ => {
                    prop_assert_eq!(map.get(key), model.get(&key));
                }
            }
            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(
                map.first_key_value(),
                model.first_key_value().map(|(k, v)| (*k, v))
            );
            prop_assert_eq!(
                map.last_key_value(),
                model.last_key_value().map(|(k, v)| (*k, v))
            );
        }
        map.validate();
    }

    /// The event stream is a pure function of the command stream.
    #[test]
    fn matching_is_deterministic(raw in vec((any::<bool>(), 0u64..32, 1u64..20), 1..200)) {
        let commands: Vec<OrderCommand> = raw
            .iter()
            .enumerate()
            .map(|(i, &(is_bid, tick, size))| {
                let side = if is_bid { Side::Bid } else { Side::Ask };
                OrderCommand::new(i as u64 + 1, side, 1_000 + tick, size)
            })
            .collect();

        let first = run_stream(&commands);
        let second = run_stream(&commands);
        prop_assert_eq!(first, second);
    }

    /// Size conservation: accepted quantity ends up either traded (once per
    /// side) or still resting.
    #[test]
    fn quantity_is_conserved(raw in vec((any::<bool>(), 0u64..16, 1u64..30), 1..150)) {
        let mut book = OrderBook::with_sink("CONS", RecordingSink::new());
        let mut submitted = 0u64;
        for (i, &(is_bid, tick, size)) in raw.iter().enumerate() {
            let side = if is_bid { Side::Bid } else { Side::Ask };
            book.new_order(&OrderCommand::new(i as u64 + 1, side, 500 + tick, size));
            submitted += size;
        }
        book.validate_invariants();

        let traded: u64 = book.sink().trades.iter().map(|t| t.size).sum();
        let resting_bid: u64 = (0..16u64)
            .filter_map(|t| book.volume_at(Side::Bid, 500 + t))
            .sum();
        let resting_ask: u64 = (0..16u64)
            .filter_map(|t| book.volume_at(Side::Ask, 500 + t))
            .sum();
        prop_assert_eq!(submitted, 2 * traded + resting_bid + resting_ask);
    }
}
