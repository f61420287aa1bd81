//! Fanout-256 node: a direct child table indexed by the dispatch byte.

use super::Slot;

pub(crate) struct Node256<V> {
    pub(crate) key: u64,
    pub(crate) level: u8,
    /// u16 because a full node holds 256 children.
    pub(crate) count: u16,
    pub(crate) slots: [Option<Slot<V>>; 256],
}

impl<V> Node256<V> {
    pub(crate) fn empty() -> Box<Self> {
        Box::new(Node256 {
            key: 0,
            level: 0,
            count: 0,
            slots: std::array::from_fn(|_| None),
        })
    }

    pub(crate) fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
    }

    pub(crate) fn get(&self, byte: u8) -> Option<&Slot<V>> {
        self.slots[byte as usize].as_ref()
    }

    pub(crate) fn has(&self, byte: u8) -> bool {
        self.slots[byte as usize].is_some()
    }

    pub(crate) fn insert(&mut self, byte: u8, slot: Slot<V>) {
        debug_assert!(self.slots[byte as usize].is_none());
        self.slots[byte as usize] = Some(slot);
        self.count += 1;
    }

    /// Finalizes removal of an entry the caller knows exists; the slot itself
    /// may already be vacant when a recursive descent took the child out.
    pub(crate) fn remove(&mut self, byte: u8) -> Option<Slot<V>> {
        debug_assert!(self.count > 0);
        self.count -= 1;
        self.slots[byte as usize].take()
    }

    pub(crate) fn take_slot(&mut self, byte: u8) -> Slot<V> {
        match self.slots[byte as usize].take() {
            Some(slot) => slot,
            None => panic!("node256 slot {byte} unexpectedly vacant"),
        }
    }

    pub(crate) fn set_slot(&mut self, byte: u8, slot: Slot<V>) {
        self.slots[byte as usize] = Some(slot);
    }

    pub(crate) fn replace_value(&mut self, byte: u8, value: V) -> V {
        match self.slots[byte as usize].as_mut() {
            Some(Slot::Value(v)) => std::mem::replace(v, value),
            _ => panic!("node256 slot {byte} does not hold a value"),
        }
    }

    pub(crate) fn min_entry(&self) -> Option<(u8, &Slot<V>)> {
        for byte in 0..=255u8 {
            if let Some(slot) = self.slots[byte as usize].as_ref() {
                return Some((byte, slot));
            }
        }
        None
    }

    pub(crate) fn max_entry(&self) -> Option<(u8, &Slot<V>)> {
        for byte in (0..=255u8).rev() {
            if let Some(slot) = self.slots[byte as usize].as_ref() {
                return Some((byte, slot));
            }
        }
        None
    }
}
