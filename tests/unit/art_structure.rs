//! Structural tests for the adaptive radix tree: prefix divergence, node
//! growth across all variants, ordered extraction and pool round trips.

use artbook_rs::{ArtConfig, LongArt, NodeCensus, NodePoolConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_prefix_keys_diverge_correctly() {
        let mut map = LongArt::new();
        let keys: [(u64, u32); 4] = [
            (0x1234_5678_9ABC_DEF0, 1),
            (0x1234_5678_9ABC_DE01, 2),
            (0x1234_5678_9ABC_1234, 3),
            (0x1234_5678_FEDC_BA98, 4),
        ];
        for &(k, v) in &keys {
            map.put(k, v);
        }
        map.validate();

        for &(k, v) in &keys {
            assert_eq!(map.get(k), Some(&v), "lookup of {k:#018x}");
        }
        assert_eq!(map.get(0x1234_5678_9ABC_DEF1), None);

        assert_eq!(map.first_key_value(), Some((0x1234_5678_9ABC_1234, &3)));
        assert_eq!(map.last_key_value(), Some((0x1234_5678_FEDC_BA98, &4)));
    }

    #[test]
    fn low_byte_fanout_grows_n4_to_n16_to_n48() {
        let mut map = LongArt::new();
        let base = 0x0102_0304_0506_0700u64;

        for i in 0..4u64 {
            map.put(base | i, i);
        }
        assert_eq!(map.census().n4, 1);
        assert_eq!(map.census().n16, 0);

        // the fifth key overflows the Node4
        map.put(base | 4, 4);
        let census = map.census();
        assert_eq!((census.n4, census.n16), (0, 1));

        for i in 5..16u64 {
            map.put(base | i, i);
        }
        assert_eq!(map.census().n16, 1);

        // the seventeenth key overflows the Node16
        map.put(base | 16, 16);
        let census = map.census();
        assert_eq!((census.n16, census.n48), (0, 1));

        map.validate();
        for i in 0..=16u64 {
            assert_eq!(map.get(base | i), Some(&i), "key {i} lost during growth");
        }
    }

    #[test]
    fn repeated_min_extraction_yields_ascending_keys() {
        let mut map = LongArt::new();
        let mut keys: Vec<u64> = (0..128u64)
            .map(|i| i.wrapping_mul(0x9E37_79B9_7F4A_7C15))
            .collect();
        for &k in &keys {
            map.put(k, ());
        }

        let mut drained = Vec::new();
        while let Some((k, _)) = map.first_key_value() {
            drained.push(k);
            map.remove(k);
        }
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(drained, keys);
        assert!(map.is_empty());
    }

    #[test]
    fn repeated_max_extraction_yields_descending_keys() {
        let mut map = LongArt::new();
        for i in 0..64u64 {
            map.put(i * 1_000_003, i);
        }
        let mut previous = u64::MAX;
        while let Some((k, _)) = map.last_key_value() {
            assert!(k < previous);
            previous = k;
            map.remove(k);
        }
    }

    #[test]
    fn full_drain_returns_every_shell_to_the_pool() {
        let config = ArtConfig {
            pool: NodePoolConfig {
                n4: 64,
                n16: 16,
                n48: 4,
                n256: 2,
            },
            ..ArtConfig::default()
        };
        let mut map = LongArt::with_config(config);
        let idle = map.pool_stats();

        // spread keys across several byte planes so every variant appears
        for hi in 0..3u64 {
            for lo in 0..60u64 {
                map.put((hi << 40) | lo, hi + lo);
            }
        }
        map.validate();
        assert!(map.pool_stats().n4 < idle.n4);

        for hi in 0..3u64 {
            for lo in 0..60u64 {
                assert!(map.remove((hi << 40) | lo).is_some());
            }
        }
        assert!(map.is_empty());
        assert_eq!(map.census(), NodeCensus::default());
        assert_eq!(map.pool_stats(), idle);
    }

    #[test]
    fn extreme_keys_round_trip() {
        let mut map = LongArt::new();
        for k in [0u64, 1, u64::MAX, u64::MAX - 1, 1u64 << 63, 0x00FF_00FF_00FF_00FF] {
            map.put(k, k);
        }
        map.validate();
        assert_eq!(map.first_key_value(), Some((0, &0)));
        assert_eq!(map.last_key_value(), Some((u64::MAX, &u64::MAX)));
        assert_eq!(map.get(1u64 << 63), Some(&(1u64 << 63)));
    }
}
