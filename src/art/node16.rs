//! Fanout-16 node: the same sorted parallel-array layout as `Node4`, scaled.

use super::Slot;

pub(crate) struct Node16<V> {
    pub(crate) key: u64,
    pub(crate) level: u8,
    pub(crate) count: u8,
    pub(crate) keys: [u8; 16],
    pub(crate) slots: [Option<Slot<V>>; 16],
}

pub(crate) const NODE16_CAPACITY: usize = 16;

impl<V> Node16<V> {
    pub(crate) fn empty() -> Box<Self> {
        Box::new(Node16 {
            key: 0,
            level: 0,
            count: 0,
            keys: [0; 16],
            slots: std::array::from_fn(|_| None),
        })
    }

    pub(crate) fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
    }

    pub(crate) fn position(&self, byte: u8) -> Result<usize, usize> {
        for i in 0..self.count as usize {
            let k = self.keys[i];
            if byte == k {
                return Ok(i);
            }
            if byte < k {
                return Err(i);
            }
        }
        Err(self.count as usize)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.count as usize == NODE16_CAPACITY
    }

    pub(crate) fn insert_at(&mut self, pos: usize, byte: u8, slot: Slot<V>) {
        debug_assert!(!self.is_full());
        let count = self.count as usize;
        for i in (pos..count).rev() {
            self.keys[i + 1] = self.keys[i];
            self.slots[i + 1] = self.slots[i].take();
        }
        self.keys[pos] = byte;
        self.slots[pos] = Some(slot);
        self.count += 1;
    }

    pub(crate) fn remove_at(&mut self, pos: usize) -> Option<Slot<V>> {
        let count = self.count as usize;
        let taken = self.slots[pos].take();
        for i in pos..count - 1 {
            self.keys[i] = self.keys[i + 1];
            self.slots[i] = self.slots[i + 1].take();
        }
        self.count -= 1;
        taken
    }

    pub(crate) fn take_slot(&mut self, pos: usize) -> Slot<V> {
        match self.slots[pos].take() {
            Some(slot) => slot,
            None => panic!("node16 slot {pos} unexpectedly vacant"),
        }
    }

    pub(crate) fn set_slot(&mut self, pos: usize, slot: Slot<V>) {
        self.slots[pos] = Some(slot);
    }

    pub(crate) fn slot_ref(&self, pos: usize) -> Option<&Slot<V>> {
        self.slots[pos].as_ref()
    }

    pub(crate) fn replace_value(&mut self, pos: usize, value: V) -> V {
        match self.slots[pos].as_mut() {
            Some(Slot::Value(v)) => std::mem::replace(v, value),
            _ => panic!("node16 slot {pos} does not hold a value"),
        }
    }

    pub(crate) fn min_entry(&self) -> Option<(u8, &Slot<V>)> {
        if self.count == 0 {
            return None;
        }
        self.slots[0].as_ref().map(|s| (self.keys[0], s))
    }

    pub(crate) fn max_entry(&self) -> Option<(u8, &Slot<V>)> {
        if self.count == 0 {
            return None;
        }
        let last = self.count as usize - 1;
        self.slots[last].as_ref().map(|s| (self.keys[last], s))
    }
}
