//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resident orders at a single price
//! point on one side. Orders are maintained in a doubly-linked FIFO
//! queue (time priority): new orders are appended at the tail, and any
//! order can be delinked in O(1) using its slab key. Because appends
//! happen in sequence order and removals splice in place, walking the
//! queue head-to-tail always yields strictly ascending sequence
//! numbers.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! The actual order data lives in the slab; this struct only holds the
//! queue metadata plus a running total of resident size, so the
//! aggregate-size query is O(1).

use slab::Slab;

use crate::orderbook::ResidentOrder;
use crate::types::Order;

/// A price level containing the orders resident at a single price.
///
/// Invariant: a level is only reachable from its ladder while it holds
/// at least one order; the ladder retires it the moment it empties.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Running total of `size` over all resident orders.
    /// Updated on append, delink, and size modification.
    pub total_size: u64,

    /// Head of the order queue (oldest order, slab key)
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_size: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// Check if the price level is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order at the tail of the queue.
    ///
    /// Appending in sequence order is what maintains time priority.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<ResidentOrder>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        let size = node.size;

        // Update linked list pointers
        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            // Link the old tail to the new node
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            // Empty list - this is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_size = self.total_size.saturating_add(size);
    }

    /// Delink an order from the queue by slab key.
    ///
    /// Works anywhere in the queue; the neighbors are spliced together
    /// so the remaining orders keep their relative time priority.
    ///
    /// # Returns
    ///
    /// The size of the removed order.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<ResidentOrder>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let size = node.size;
        let prev_key = node.prev;
        let next_key = node.next;

        // Update the previous node's next pointer
        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("Invalid prev key");
            prev_node.next = next_key;
        } else {
            // This was the head
            self.head = next_key;
        }

        // Update the next node's prev pointer
        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("Invalid next key");
            next_node.prev = prev_key;
        } else {
            // This was the tail
            self.tail = prev_key;
        }

        // Clear the removed node's pointers
        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_size = self.total_size.saturating_sub(size);

        size
    }

    /// Account for an in-place size modification of a resident order.
    ///
    /// The order itself stays where it is in the queue; only the
    /// cached aggregate moves.
    pub fn update_size(&mut self, old_size: u64, new_size: u64) {
        self.total_size = self
            .total_size
            .saturating_sub(old_size)
            .saturating_add(new_size);
    }

    /// Stream a boundary [`Order`] for each resident, oldest first.
    pub fn dump<F>(&self, slab: &Slab<ResidentOrder>, sink: &mut F)
    where
        F: FnMut(Order),
    {
        let mut cursor = self.head;
        while let Some(key) = cursor {
            let node = slab.get(key).expect("Invalid slab key");
            sink(node.to_order());
            cursor = node.next;
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
