//! Pooled storage for resting orders and price buckets.
//!
//! Both arenas are `Vec`-backed slabs addressed by stable `u32` indices,
//! with a LIFO stack of vacant slots. Handles never dangle in practice
//! because the order index is the only place handles escape to, and an id
//! leaves the index in the same mutation that releases its slot.
//!
//! The per-price FIFO is a doubly-linked list threaded through the order
//! records themselves (`prev`/`next` hold arena indices, [`NIL`] terminates)
//! so that head pop, tail append and arbitrary cancel are all O(1).

use super::types::{OrderCommand, Side};

/// Sentinel for an absent arena index or list link.
pub(crate) const NIL: u32 = u32::MAX;

/// A resting order. Owned by exactly one bucket while linked; mutated only
/// by fill decrements on `remaining`.
#[derive(Debug)]
pub(crate) struct OrderRecord {
    pub id: u64,
    pub uid: u64,
    pub side: Side,
    pub price: u64,
    pub remaining: u64,
    pub timestamp: u64,
    pub prev: u32,
    pub next: u32,
}

impl OrderRecord {
    fn vacant() -> Self {
        OrderRecord {
            id: 0,
            uid: 0,
            side: Side::Bid,
            price: 0,
            remaining: 0,
            timestamp: 0,
            prev: NIL,
            next: NIL,
        }
    }
}

pub(crate) struct OrderArena {
    slots: Vec<OrderRecord>,
    free: Vec<u32>,
    live: usize,
}

impl OrderArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        let mut free = Vec::with_capacity(capacity);
        for i in 0..capacity {
            slots.push(OrderRecord::vacant());
            free.push(i as u32);
        }
        OrderArena {
            slots,
            free,
            live: 0,
        }
    }

    pub(crate) fn acquire(&mut self, cmd: &OrderCommand, remaining: u64) -> u32 {
        let record = OrderRecord {
            id: cmd.id,
            uid: cmd.uid,
            side: cmd.side,
            price: cmd.price,
            remaining,
            timestamp: cmd.timestamp,
            prev: NIL,
            next: NIL,
        };
        self.live += 1;
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = record;
                idx
            }
            None => {
                self.slots.push(record);
                (self.slots.len() - 1) as u32
            }
        }
    }

    pub(crate) fn release(&mut self, idx: u32) {
        let record = &mut self.slots[idx as usize];
        record.remaining = 0;
        record.prev = NIL;
        record.next = NIL;
        self.live -= 1;
        self.free.push(idx);
    }

    pub(crate) fn get(&self, idx: u32) -> &OrderRecord {
        &self.slots[idx as usize]
    }

    pub(crate) fn get_mut(&mut self, idx: u32) -> &mut OrderRecord {
        &mut self.slots[idx as usize]
    }

    /// Number of live (resting) orders.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}

/// One price level: FIFO of resting orders plus the running volume sum.
#[derive(Debug)]
pub(crate) struct Bucket {
    pub price: u64,
    /// Always equals the sum of `remaining` over the linked orders.
    pub total_volume: u64,
    pub head: u32,
    pub tail: u32,
    pub order_count: u32,
}

impl Bucket {
    fn vacant() -> Self {
        Bucket {
            price: 0,
            total_volume: 0,
            head: NIL,
            tail: NIL,
            order_count: 0,
        }
    }

    /// Links `idx` at the tail (latest time priority).
    pub(crate) fn push_back(&mut self, orders: &mut OrderArena, idx: u32) {
        let size = orders.get(idx).remaining;
        {
            let record = orders.get_mut(idx);
            record.prev = self.tail;
            record.next = NIL;
        }
        if self.tail == NIL {
            self.head = idx;
        } else {
            orders.get_mut(self.tail).next = idx;
        }
        self.tail = idx;
        self.order_count += 1;
        self.total_volume += size;
    }

    /// Unlinks `idx` from anywhere in the list, subtracting whatever
    /// quantity it still carries.
    pub(crate) fn unlink(&mut self, orders: &mut OrderArena, idx: u32) {
        let (prev, next, remaining) = {
            let record = orders.get(idx);
            (record.prev, record.next, record.remaining)
        };
        if prev == NIL {
            self.head = next;
        } else {
            orders.get_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            orders.get_mut(next).prev = prev;
        }
        let record = orders.get_mut(idx);
        record.prev = NIL;
        record.next = NIL;
        self.order_count -= 1;
        self.total_volume -= remaining;
    }
}

pub(crate) struct BucketArena {
    slots: Vec<Bucket>,
    free: Vec<u32>,
    live: usize,
}

impl BucketArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        let mut free = Vec::with_capacity(capacity);
        for i in 0..capacity {
            slots.push(Bucket::vacant());
            free.push(i as u32);
        }
        BucketArena {
            slots,
            free,
            live: 0,
        }
    }

    pub(crate) fn acquire(&mut self, price: u64) -> u32 {
        let bucket = Bucket {
            price,
            total_volume: 0,
            head: NIL,
            tail: NIL,
            order_count: 0,
        };
        self.live += 1;
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = bucket;
                idx
            }
            None => {
                self.slots.push(bucket);
                (self.slots.len() - 1) as u32
            }
        }
    }

    pub(crate) fn release(&mut self, idx: u32) {
        let bucket = &mut self.slots[idx as usize];
        debug_assert_eq!(bucket.order_count, 0, "releasing a non-empty bucket");
        bucket.total_volume = 0;
        bucket.head = NIL;
        bucket.tail = NIL;
        self.live -= 1;
        self.free.push(idx);
    }

    pub(crate) fn get(&self, idx: u32) -> &Bucket {
        &self.slots[idx as usize]
    }

    pub(crate) fn get_mut(&mut self, idx: u32) -> &mut Bucket {
        &mut self.slots[idx as usize]
    }

    /// Number of live price levels.
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
