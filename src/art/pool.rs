//! Typed free lists for the four node variants.
//!
//! Each variant gets its own bounded LIFO stack. Acquisition pops a recycled
//! shell or allocates a fresh one; it never fails. Release resets the shell
//! and pushes it back, unless the stack is at capacity, in which case the
//! shell simply drops to the allocator. The pool is owned by a single
//! [`LongArt`](super::LongArt) instance and is not shared.

use serde::{Deserialize, Serialize};

use super::Slot;
use super::node4::Node4;
use super::node16::Node16;
use super::node48::Node48;
use super::node256::Node256;

/// Free-list capacities per node variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolConfig {
    /// Retained `Node4` shells.
    pub n4: usize,
    /// Retained `Node16` shells.
    pub n16: usize,
    /// Retained `Node48` shells.
    pub n48: usize,
    /// Retained `Node256` shells.
    pub n256: usize,
}

impl Default for NodePoolConfig {
    fn default() -> Self {
        NodePoolConfig {
            n4: 256,
            n16: 128,
            n48: 64,
            n256: 32,
        }
    }
}

/// Current free-list occupancy, per variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Idle `Node4` shells.
    pub n4: usize,
    /// Idle `Node16` shells.
    pub n16: usize,
    /// Idle `Node48` shells.
    pub n48: usize,
    /// Idle `Node256` shells.
    pub n256: usize,
}

pub(crate) struct NodePool<V> {
    n4: Vec<Box<Node4<V>>>,
    n16: Vec<Box<Node16<V>>>,
    n48: Vec<Box<Node48<V>>>,
    n256: Vec<Box<Node256<V>>>,
    config: NodePoolConfig,
}

impl<V> NodePool<V> {
    pub(crate) fn new(config: NodePoolConfig) -> Self {
        let mut pool = NodePool {
            n4: Vec::with_capacity(config.n4),
            n16: Vec::with_capacity(config.n16),
            n48: Vec::with_capacity(config.n48),
            n256: Vec::with_capacity(config.n256),
            config,
        };
        for _ in 0..config.n4 {
            pool.n4.push(Node4::empty());
        }
        for _ in 0..config.n16 {
            pool.n16.push(Node16::empty());
        }
        for _ in 0..config.n48 {
            pool.n48.push(Node48::empty());
        }
        for _ in 0..config.n256 {
            pool.n256.push(Node256::empty());
        }
        pool
    }

    pub(crate) fn acquire4(&mut self) -> Box<Node4<V>> {
        self.n4.pop().unwrap_or_else(Node4::empty)
    }

    pub(crate) fn acquire16(&mut self) -> Box<Node16<V>> {
        self.n16.pop().unwrap_or_else(Node16::empty)
    }

    pub(crate) fn acquire48(&mut self) -> Box<Node48<V>> {
        self.n48.pop().unwrap_or_else(Node48::empty)
    }

    pub(crate) fn acquire256(&mut self) -> Box<Node256<V>> {
        self.n256.pop().unwrap_or_else(Node256::empty)
    }

    pub(crate) fn release4(&mut self, mut node: Box<Node4<V>>) {
        if self.n4.len() < self.config.n4 {
            node.reset();
            self.n4.push(node);
        }
    }

    pub(crate) fn release16(&mut self, mut node: Box<Node16<V>>) {
        if self.n16.len() < self.config.n16 {
            node.reset();
            self.n16.push(node);
        }
    }

    pub(crate) fn release48(&mut self, mut node: Box<Node48<V>>) {
        if self.n48.len() < self.config.n48 {
            node.reset();
            self.n48.push(node);
        }
    }

    pub(crate) fn release256(&mut self, mut node: Box<Node256<V>>) {
        if self.n256.len() < self.config.n256 {
            node.reset();
            self.n256.push(node);
        }
    }

    /// Builds a single-entry leaf node for `key` at the leaf plane.
    pub(crate) fn new_leaf(&mut self, key: u64, value: V) -> Box<Node4<V>> {
        let mut node = self.acquire4();
        node.key = key;
        node.level = 0;
        node.count = 1;
        node.keys[0] = (key & 0xFF) as u8;
        node.slots[0] = Some(Slot::Value(value));
        node
    }

    pub(crate) fn stats(&self) -> PoolStats {
        PoolStats {
            n4: self.n4.len(),
            n16: self.n16.len(),
            n48: self.n48.len(),
            n256: self.n256.len(),
        }
    }
}
