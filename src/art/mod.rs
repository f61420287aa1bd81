//! A 64-bit-keyed adaptive radix tree.
//!
//! [`LongArt`] is an ordered map from `u64` keys to values, built from four
//! node variants (fanout 4, 16, 48 and 256) that grow and shrink into each
//! other as entries come and go. Internal nodes dispatch on one byte of the
//! key; path compression is fixed-width and implicit: every node records
//! the full key it was created for together with the byte position it
//! dispatches on, so chains of single-child nodes never materialize.
//!
//! Lookups are at most eight byte steps. Every descent step first checks the
//! compressed prefix (`key XOR node_key` masked to the bytes above the
//! node's plane) and bails out early when the key cannot live in the
//! subtree.
//!
//! The tree is single-writer and allocates node shells through a bounded
//! per-instance free list ([`NodePoolConfig`]). There is deliberately no
//! iteration or range-scan surface: the intended consumer needs point
//! operations and the extremes ([`LongArt::first_key_value`] /
//! [`LongArt::last_key_value`]) only.

mod node4;
mod node16;
mod node48;
mod node256;
mod pool;

use serde::{Deserialize, Serialize};

use node4::{NODE4_CAPACITY, Node4};
use node16::{NODE16_CAPACITY, Node16};
use node48::{NODE48_CAPACITY, Node48};
use node256::Node256;
use pool::NodePool;

pub use pool::{NodePoolConfig, PoolStats};

/// Child-count thresholds at which a node migrates to the next smaller
/// variant. Each threshold must fit the target variant; the defaults leave
/// headroom below the target's capacity so that an insert right after a
/// shrink does not immediately grow the node back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkThresholds {
    /// `Node16` shrinks to `Node4` at this child count (default 3).
    pub n16_to_n4: u8,
    /// `Node48` shrinks to `Node16` at this child count (default 12).
    pub n48_to_n16: u8,
    /// `Node256` shrinks to `Node48` at this child count (default 37).
    pub n256_to_n48: u8,
}

impl Default for ShrinkThresholds {
    fn default() -> Self {
        ShrinkThresholds {
            n16_to_n4: 3,
            n48_to_n16: 12,
            n256_to_n48: 37,
        }
    }
}

/// Tree configuration: node pool capacities and shrink thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtConfig {
    /// Free-list capacities per node variant.
    pub pool: NodePoolConfig,
    /// Downsizing thresholds.
    pub shrink: ShrinkThresholds,
}

/// Live node counts per variant, gathered by walking the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeCensus {
    /// Live `Node4` nodes.
    pub n4: usize,
    /// Live `Node16` nodes.
    pub n16: usize,
    /// Live `Node48` nodes.
    pub n48: usize,
    /// Live `Node256` nodes.
    pub n256: usize,
}

/// One child slot: a value on the leaf plane, a subtree everywhere else.
pub(crate) enum Slot<V> {
    Value(V),
    Node(ArtNode<V>),
}

/// A tree node, tagged by fanout variant.
pub(crate) enum ArtNode<V> {
    N4(Box<Node4<V>>),
    N16(Box<Node16<V>>),
    N48(Box<Node48<V>>),
    N256(Box<Node256<V>>),
}

/// Mask selecting the bytes strictly above the dispatch byte at `level`.
/// Zero at the top plane (level 56), where nothing sits above.
#[inline]
pub(crate) fn prefix_mask(level: u8) -> u64 {
    (!0u64).checked_shl(u32::from(level) + 8).unwrap_or(0)
}

#[inline]
pub(crate) fn dispatch_byte(key: u64, level: u8) -> u8 {
    ((key >> level) & 0xFF) as u8
}

impl<V> ArtNode<V> {
    fn node_key(&self) -> u64 {
        match self {
            ArtNode::N4(n) => n.key,
            ArtNode::N16(n) => n.key,
            ArtNode::N48(n) => n.key,
            ArtNode::N256(n) => n.key,
        }
    }

    fn node_level(&self) -> u8 {
        match self {
            ArtNode::N4(n) => n.level,
            ArtNode::N16(n) => n.level,
            ArtNode::N48(n) => n.level,
            ArtNode::N256(n) => n.level,
        }
    }

    fn find(&self, byte: u8) -> Option<&Slot<V>> {
        match self {
            ArtNode::N4(n) => n.position(byte).ok().and_then(|i| n.slot_ref(i)),
            ArtNode::N16(n) => n.position(byte).ok().and_then(|i| n.slot_ref(i)),
            ArtNode::N48(n) => n.position(byte).and_then(|i| n.slot_ref(i)),
            ArtNode::N256(n) => n.get(byte),
        }
    }

    fn min_entry(&self) -> Option<(u8, &Slot<V>)> {
        match self {
            ArtNode::N4(n) => n.min_entry(),
            ArtNode::N16(n) => n.min_entry(),
            ArtNode::N48(n) => n.min_entry(),
            ArtNode::N256(n) => n.min_entry(),
        }
    }

    fn max_entry(&self) -> Option<(u8, &Slot<V>)> {
        match self {
            ArtNode::N4(n) => n.max_entry(),
            ArtNode::N16(n) => n.max_entry(),
            ArtNode::N48(n) => n.max_entry(),
            ArtNode::N256(n) => n.max_entry(),
        }
    }

    fn for_each_child(&self, f: &mut impl FnMut(u8, &Slot<V>)) {
        match self {
            ArtNode::N4(n) => {
                for i in 0..n.count as usize {
                    if let Some(slot) = n.slot_ref(i) {
                        f(n.keys[i], slot);
                    }
                }
            }
            ArtNode::N16(n) => {
                for i in 0..n.count as usize {
                    if let Some(slot) = n.slot_ref(i) {
                        f(n.keys[i], slot);
                    }
                }
            }
            ArtNode::N48(n) => {
                for byte in 0..=255u8 {
                    if let Some(pos) = n.position(byte)
                        && let Some(slot) = n.slot_ref(pos)
                    {
                        f(byte, slot);
                    }
                }
            }
            ArtNode::N256(n) => {
                for byte in 0..=255u8 {
                    if let Some(slot) = n.get(byte) {
                        f(byte, slot);
                    }
                }
            }
        }
    }
}

fn child_node<V>(slot: Slot<V>) -> ArtNode<V> {
    match slot {
        Slot::Node(node) => node,
        Slot::Value(_) => panic!("value slot above the leaf plane"),
    }
}

fn leaf_value<V>(slot: Slot<V>) -> V {
    match slot {
        Slot::Value(value) => value,
        Slot::Node(_) => panic!("child slot on the leaf plane"),
    }
}

/// Ordered map `u64 -> V` over adaptive radix nodes.
///
/// # Examples
///
/// ```
/// use artbook_rs::LongArt;
///
/// let mut map = LongArt::new();
/// assert_eq!(map.put(42, "a"), None);
/// assert_eq!(map.put(42, "b"), Some("a"));
/// assert_eq!(map.get(42), Some(&"b"));
/// assert_eq!(map.remove(42), Some("b"));
/// assert!(map.is_empty());
/// ```
pub struct LongArt<V> {
    root: Option<ArtNode<V>>,
    len: usize,
    shrink: ShrinkThresholds,
    pool: NodePool<V>,
}

impl<V> Default for LongArt<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LongArt<V> {
    /// Creates an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ArtConfig::default())
    }

    /// Creates an empty tree with explicit pool capacities and shrink
    /// thresholds.
    ///
    /// # Panics
    /// Panics when a shrink threshold does not fit its target variant
    /// (`n16_to_n4` in 1..=4, `n48_to_n16` in 1..=16, `n256_to_n48` in
    /// 1..=48).
    pub fn with_config(config: ArtConfig) -> Self {
        let s = config.shrink;
        assert!(
            s.n16_to_n4 >= 1 && (s.n16_to_n4 as usize) <= NODE4_CAPACITY,
            "n16_to_n4 threshold {} does not fit a Node4",
            s.n16_to_n4
        );
        assert!(
            s.n48_to_n16 >= 1 && (s.n48_to_n16 as usize) <= NODE16_CAPACITY,
            "n48_to_n16 threshold {} does not fit a Node16",
            s.n48_to_n16
        );
        assert!(
            s.n256_to_n48 >= 1 && (s.n256_to_n48 as usize) <= NODE48_CAPACITY,
            "n256_to_n48 threshold {} does not fit a Node48",
            s.n256_to_n48
        );
        LongArt {
            root: None,
            len: 0,
            shrink: s,
            pool: NodePool::new(config.pool),
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Point lookup with per-level prefix early-exit.
    #[must_use]
    pub fn get(&self, key: u64) -> Option<&V> {
        let mut node = self.root.as_ref()?;
        loop {
            if (key ^ node.node_key()) & prefix_mask(node.node_level()) != 0 {
                return None;
            }
            match node.find(dispatch_byte(key, node.node_level()))? {
                Slot::Value(value) => return Some(value),
                Slot::Node(child) => node = child,
            }
        }
    }

    /// Inserts `value` under `key`, returning the displaced prior value when
    /// the key was already present.
    pub fn put(&mut self, key: u64, value: V) -> Option<V> {
        match self.root.take() {
            None => {
                let leaf = self.pool.new_leaf(key, value);
                self.root = Some(ArtNode::N4(leaf));
                self.len += 1;
                None
            }
            Some(node) => {
                let (node, prior) = self.put_node(node, key, value);
                self.root = Some(node);
                if prior.is_none() {
                    self.len += 1;
                }
                prior
            }
        }
    }

    /// Removes `key`, returning its value when present.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let root = self.root.take()?;
        let (root, removed) = self.remove_node(root, key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Smallest key and its value.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(u64, &V)> {
        let mut node = self.root.as_ref()?;
        loop {
            let (byte, slot) = node.min_entry()?;
            match slot {
                Slot::Value(value) => {
                    return Some(((node.node_key() & !0xFF) | u64::from(byte), value));
                }
                Slot::Node(child) => node = child,
            }
        }
    }

    /// Largest key and its value.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(u64, &V)> {
        let mut node = self.root.as_ref()?;
        loop {
            let (byte, slot) = node.max_entry()?;
            match slot {
                Slot::Value(value) => {
                    return Some(((node.node_key() & !0xFF) | u64::from(byte), value));
                }
                Slot::Node(child) => node = child,
            }
        }
    }

    /// Current free-list occupancy of the node pool.
    #[must_use]
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Counts live nodes per variant by walking the tree. Intended for tests
    /// and debugging.
    #[must_use]
    pub fn census(&self) -> NodeCensus {
        let mut census = NodeCensus::default();
        if let Some(root) = &self.root {
            census_node(root, &mut census);
        }
        census
    }

    /// Checks the structural invariants of the whole tree: strict key ascent
    /// in the sorted variants, per-variant capacity bounds, byte-index and
    /// bitmap agreement in `Node48`, prefix consistency of every child
    /// against its parent, and entry-count agreement with [`Self::len`].
    /// Panics on the first violation. Intended for tests and debugging.
    pub fn validate(&self) {
        let mut counted = 0usize;
        if let Some(root) = &self.root {
            validate_node(root, &mut counted);
        }
        assert_eq!(counted, self.len, "stored entries disagree with len");
    }

    fn new_slot(&mut self, key: u64, value: V, level: u8) -> Slot<V> {
        if level == 0 {
            Slot::Value(value)
        } else {
            Slot::Node(ArtNode::N4(self.pool.new_leaf(key, value)))
        }
    }

    /// Builds a `Node4` above `existing` at the highest byte where `key`
    /// diverges from its compressed prefix, holding the existing subtree and
    /// a fresh leaf for `key`.
    fn branch(&mut self, existing: ArtNode<V>, key: u64, value: V, diff: u64) -> ArtNode<V> {
        debug_assert_ne!(diff, 0);
        let branch_level = ((63 - diff.leading_zeros()) & !7) as u8;
        debug_assert!(branch_level > existing.node_level());
        let leaf = ArtNode::N4(self.pool.new_leaf(key, value));
        let existing_byte = dispatch_byte(existing.node_key(), branch_level);
        let new_byte = dispatch_byte(key, branch_level);
        debug_assert_ne!(existing_byte, new_byte);
        let mut node = self.pool.acquire4();
        node.key = key;
        node.level = branch_level;
        if new_byte < existing_byte {
            node.insert_at(0, new_byte, Slot::Node(leaf));
            node.insert_at(1, existing_byte, Slot::Node(existing));
        } else {
            node.insert_at(0, existing_byte, Slot::Node(existing));
            node.insert_at(1, new_byte, Slot::Node(leaf));
        }
        ArtNode::N4(node)
    }

    /// Recursive insert. Takes the node by value and returns the node the
    /// parent must install in its place: the same node, a grown variant, or
    /// a new branch above it.
    fn put_node(&mut self, node: ArtNode<V>, key: u64, value: V) -> (ArtNode<V>, Option<V>) {
        let diff = key ^ node.node_key();
        if diff & prefix_mask(node.node_level()) != 0 {
            let branch = self.branch(node, key, value, diff);
            return (branch, None);
        }
        let level = node.node_level();
        let byte = dispatch_byte(key, level);
        match node {
            ArtNode::N4(mut n) => match n.position(byte) {
                Ok(pos) => {
                    if level == 0 {
                        let prior = n.replace_value(pos, value);
                        (ArtNode::N4(n), Some(prior))
                    } else {
                        let child = child_node(n.take_slot(pos));
                        let (child, prior) = self.put_node(child, key, value);
                        n.set_slot(pos, Slot::Node(child));
                        (ArtNode::N4(n), prior)
                    }
                }
                Err(pos) => {
                    let slot = self.new_slot(key, value, level);
                    if n.is_full() {
                        let mut big = self.grow4(n);
                        match big.position(byte) {
                            Err(p) => big.insert_at(p, byte, slot),
                            Ok(_) => unreachable!("byte already present after grow"),
                        }
                        (ArtNode::N16(big), None)
                    } else {
                        n.insert_at(pos, byte, slot);
                        (ArtNode::N4(n), None)
                    }
                }
            },
            ArtNode::N16(mut n) => match n.position(byte) {
                Ok(pos) => {
                    if level == 0 {
                        let prior = n.replace_value(pos, value);
                        (ArtNode::N16(n), Some(prior))
                    } else {
                        let child = child_node(n.take_slot(pos));
                        let (child, prior) = self.put_node(child, key, value);
                        n.set_slot(pos, Slot::Node(child));
                        (ArtNode::N16(n), prior)
                    }
                }
                Err(pos) => {
                    let slot = self.new_slot(key, value, level);
                    if n.is_full() {
                        let mut big = self.grow16(n);
                        big.insert(byte, slot);
                        (ArtNode::N48(big), None)
                    } else {
                        n.insert_at(pos, byte, slot);
                        (ArtNode::N16(n), None)
                    }
                }
            },
            ArtNode::N48(mut n) => match n.position(byte) {
                Some(pos) => {
                    if level == 0 {
                        let prior = n.replace_value(pos, value);
                        (ArtNode::N48(n), Some(prior))
                    } else {
                        let child = child_node(n.take_slot(pos));
                        let (child, prior) = self.put_node(child, key, value);
                        n.set_slot(pos, Slot::Node(child));
                        (ArtNode::N48(n), prior)
                    }
                }
                None => {
                    let slot = self.new_slot(key, value, level);
                    if n.is_full() {
                        let mut big = self.grow48(n);
                        big.insert(byte, slot);
                        (ArtNode::N256(big), None)
                    } else {
                        n.insert(byte, slot);
                        (ArtNode::N48(n), None)
                    }
                }
            },
            ArtNode::N256(mut n) => {
                if n.has(byte) {
                    if level == 0 {
                        let prior = n.replace_value(byte, value);
                        (ArtNode::N256(n), Some(prior))
                    } else {
                        let child = child_node(n.take_slot(byte));
                        let (child, prior) = self.put_node(child, key, value);
                        n.set_slot(byte, Slot::Node(child));
                        (ArtNode::N256(n), prior)
                    }
                } else {
                    let slot = self.new_slot(key, value, level);
                    n.insert(byte, slot);
                    (ArtNode::N256(n), None)
                }
            }
        }
    }

    /// Recursive remove. `None` in the node position tells the parent the
    /// whole subtree is gone and its entry must be dropped.
    fn remove_node(&mut self, node: ArtNode<V>, key: u64) -> (Option<ArtNode<V>>, Option<V>) {
        if (key ^ node.node_key()) & prefix_mask(node.node_level()) != 0 {
            return (Some(node), None);
        }
        let level = node.node_level();
        let byte = dispatch_byte(key, level);
        match node {
            ArtNode::N4(mut n) => {
                let Ok(pos) = n.position(byte) else {
                    return (Some(ArtNode::N4(n)), None);
                };
                if level == 0 {
                    let value = n.remove_at(pos).map(leaf_value);
                    self.settle4(n, value)
                } else {
                    let child = child_node(n.take_slot(pos));
                    let (child, removed) = self.remove_node(child, key);
                    match child {
                        Some(c) => {
                            n.set_slot(pos, Slot::Node(c));
                            (Some(ArtNode::N4(n)), removed)
                        }
                        None => {
                            n.remove_at(pos);
                            self.settle4(n, removed)
                        }
                    }
                }
            }
            ArtNode::N16(mut n) => {
                let Ok(pos) = n.position(byte) else {
                    return (Some(ArtNode::N16(n)), None);
                };
                if level == 0 {
                    let value = n.remove_at(pos).map(leaf_value);
                    self.settle16(n, value)
                } else {
                    let child = child_node(n.take_slot(pos));
                    let (child, removed) = self.remove_node(child, key);
                    match child {
                        Some(c) => {
                            n.set_slot(pos, Slot::Node(c));
                            (Some(ArtNode::N16(n)), removed)
                        }
                        None => {
                            n.remove_at(pos);
                            self.settle16(n, removed)
                        }
                    }
                }
            }
            ArtNode::N48(mut n) => {
                let Some(pos) = n.position(byte) else {
                    return (Some(ArtNode::N48(n)), None);
                };
                if level == 0 {
                    let value = n.remove(byte).map(leaf_value);
                    self.settle48(n, value)
                } else {
                    let child = child_node(n.take_slot(pos));
                    let (child, removed) = self.remove_node(child, key);
                    match child {
                        Some(c) => {
                            n.set_slot(pos, Slot::Node(c));
                            (Some(ArtNode::N48(n)), removed)
                        }
                        None => {
                            n.remove(byte);
                            self.settle48(n, removed)
                        }
                    }
                }
            }
            ArtNode::N256(mut n) => {
                if !n.has(byte) {
                    return (Some(ArtNode::N256(n)), None);
                }
                if level == 0 {
                    let value = n.remove(byte).map(leaf_value);
                    self.settle256(n, value)
                } else {
                    let child = child_node(n.take_slot(byte));
                    let (child, removed) = self.remove_node(child, key);
                    match child {
                        Some(c) => {
                            n.set_slot(byte, Slot::Node(c));
                            (Some(ArtNode::N256(n)), removed)
                        }
                        None => {
                            n.remove(byte);
                            self.settle256(n, removed)
                        }
                    }
                }
            }
        }
    }

    /// Post-removal bookkeeping for a `Node4`: release an emptied node, or
    /// re-compress the path by replacing a single-child inner node with that
    /// child.
    fn settle4(
        &mut self,
        mut n: Box<Node4<V>>,
        removed: Option<V>,
    ) -> (Option<ArtNode<V>>, Option<V>) {
        if n.count == 0 {
            self.pool.release4(n);
            return (None, removed);
        }
        if n.count == 1 && n.level > 0 {
            let child = child_node(n.take_slot(0));
            self.pool.release4(n);
            return (Some(child), removed);
        }
        (Some(ArtNode::N4(n)), removed)
    }

    fn settle16(
        &mut self,
        n: Box<Node16<V>>,
        removed: Option<V>,
    ) -> (Option<ArtNode<V>>, Option<V>) {
        debug_assert!(n.count > 0);
        if n.count <= self.shrink.n16_to_n4 {
            let small = self.shrink16(n);
            return (Some(ArtNode::N4(small)), removed);
        }
        (Some(ArtNode::N16(n)), removed)
    }

    fn settle48(
        &mut self,
        n: Box<Node48<V>>,
        removed: Option<V>,
    ) -> (Option<ArtNode<V>>, Option<V>) {
        debug_assert!(n.count > 0);
        if n.count <= self.shrink.n48_to_n16 {
            let small = self.shrink48(n);
            return (Some(ArtNode::N16(small)), removed);
        }
        (Some(ArtNode::N48(n)), removed)
    }

    fn settle256(
        &mut self,
        n: Box<Node256<V>>,
        removed: Option<V>,
    ) -> (Option<ArtNode<V>>, Option<V>) {
        debug_assert!(n.count > 0);
        if n.count <= u16::from(self.shrink.n256_to_n48) {
            let small = self.shrink256(n);
            return (Some(ArtNode::N48(small)), removed);
        }
        (Some(ArtNode::N256(n)), removed)
    }

    fn grow4(&mut self, mut small: Box<Node4<V>>) -> Box<Node16<V>> {
        let mut big = self.pool.acquire16();
        big.key = small.key;
        big.level = small.level;
        big.count = small.count;
        for i in 0..small.count as usize {
            big.keys[i] = small.keys[i];
            big.slots[i] = small.slots[i].take();
        }
        self.pool.release4(small);
        big
    }

    fn grow16(&mut self, mut small: Box<Node16<V>>) -> Box<Node48<V>> {
        let mut big = self.pool.acquire48();
        big.key = small.key;
        big.level = small.level;
        for i in 0..small.count as usize {
            let byte = small.keys[i];
            let slot = small.slots[i].take().expect("occupied sorted slot");
            big.insert(byte, slot);
        }
        self.pool.release16(small);
        big
    }

    fn grow48(&mut self, mut small: Box<Node48<V>>) -> Box<Node256<V>> {
        let mut big = self.pool.acquire256();
        big.key = small.key;
        big.level = small.level;
        for byte in 0..=255u8 {
            if let Some(pos) = small.position(byte) {
                big.insert(byte, small.take_slot(pos));
            }
        }
        self.pool.release48(small);
        big
    }

    fn shrink16(&mut self, mut big: Box<Node16<V>>) -> Box<Node4<V>> {
        debug_assert!((big.count as usize) <= NODE4_CAPACITY);
        let mut small = self.pool.acquire4();
        small.key = big.key;
        small.level = big.level;
        small.count = big.count;
        for i in 0..big.count as usize {
            small.keys[i] = big.keys[i];
            small.slots[i] = big.slots[i].take();
        }
        self.pool.release16(big);
        small
    }

    fn shrink48(&mut self, mut big: Box<Node48<V>>) -> Box<Node16<V>> {
        debug_assert!((big.count as usize) <= NODE16_CAPACITY);
        let mut small = self.pool.acquire16();
        small.key = big.key;
        small.level = big.level;
        let mut i = 0usize;
        for byte in 0..=255u8 {
            if let Some(pos) = big.position(byte) {
                small.keys[i] = byte;
                small.slots[i] = Some(big.take_slot(pos));
                i += 1;
            }
        }
        small.count = i as u8;
        self.pool.release48(big);
        small
    }

    fn shrink256(&mut self, mut big: Box<Node256<V>>) -> Box<Node48<V>> {
        debug_assert!((big.count as usize) <= NODE48_CAPACITY);
        let mut small = self.pool.acquire48();
        small.key = big.key;
        small.level = big.level;
        for byte in 0..=255u8 {
            if big.has(byte) {
                small.insert(byte, big.take_slot(byte));
            }
        }
        self.pool.release256(big);
        small
    }
}

fn census_node<V>(node: &ArtNode<V>, census: &mut NodeCensus) {
    match node {
        ArtNode::N4(_) => census.n4 += 1,
        ArtNode::N16(_) => census.n16 += 1,
        ArtNode::N48(_) => census.n48 += 1,
        ArtNode::N256(_) => census.n256 += 1,
    }
    node.for_each_child(&mut |_, slot| {
        if let Slot::Node(child) = slot {
            census_node(child, census);
        }
    });
}

fn validate_node<V>(node: &ArtNode<V>, counted: &mut usize) {
    let level = node.node_level();
    let nkey = node.node_key();
    assert_eq!(level % 8, 0, "node level {level} not byte aligned");
    match node {
        ArtNode::N4(n) => {
            assert!(n.count >= 1 && (n.count as usize) <= NODE4_CAPACITY);
            for i in 1..n.count as usize {
                assert!(n.keys[i - 1] < n.keys[i], "node4 keys not ascending");
            }
        }
        ArtNode::N16(n) => {
            assert!(n.count >= 1 && (n.count as usize) <= NODE16_CAPACITY);
            for i in 1..n.count as usize {
                assert!(n.keys[i - 1] < n.keys[i], "node16 keys not ascending");
            }
        }
        ArtNode::N48(n) => {
            assert!(n.count >= 1 && (n.count as usize) <= NODE48_CAPACITY);
            assert_eq!(
                n.occupied.count_ones(),
                u32::from(n.count),
                "node48 bitmap disagrees with count"
            );
            let indexed = (0..=255u8).filter(|&b| n.position(b).is_some()).count();
            assert_eq!(indexed, n.count as usize, "node48 byte index disagrees");
        }
        ArtNode::N256(n) => {
            assert!(n.count >= 1 && n.count <= 256);
            let occupied = (0..=255u8).filter(|&b| n.has(b)).count();
            assert_eq!(occupied, n.count as usize, "node256 table disagrees");
        }
    }
    node.for_each_child(&mut |byte, slot| match slot {
        Slot::Value(_) => {
            assert_eq!(level, 0, "value stored above the leaf plane");
            *counted += 1;
        }
        Slot::Node(child) => {
            assert!(level >= 8, "child subtree on the leaf plane");
            assert!(
                child.node_level() <= level - 8,
                "child level {} not below parent level {level}",
                child.node_level()
            );
            assert_eq!(
                (child.node_key() ^ nkey) & prefix_mask(level),
                0,
                "child prefix disagrees with parent"
            );
            assert_eq!(
                dispatch_byte(child.node_key(), level),
                byte,
                "child key disagrees with its dispatch byte"
            );
            validate_node(child, counted);
        }
    });
}
