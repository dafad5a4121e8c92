//! Resident order storage for the slab.
//!
//! ## Design
//!
//! `ResidentOrder` is the book's internal representation of one live
//! order: the boundary fields (with the price already converted to a
//! fixed-point key), the sequence number stamped at add time, and
//! doubly-linked list pointers threading it into its price level's
//! FIFO queue.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! The queue pointers are slab keys, never references, so a resident
//! carries no owning back-pointer to its level: cancels re-enter
//! through the ladder using the resident's (side, price) as the
//! lookup key.

use crate::types::price::fixed_to_f64;
use crate::types::{Order, Side};

/// A live order as stored in the slab.
///
/// `size` is the only mutable field; id, price, side, and sequence are
/// fixed for the lifetime of the record.
#[derive(Debug, Clone)]
pub struct ResidentOrder {
    /// Unique order identifier
    pub id: u64,

    /// Fixed-point price key (scaled by 10^8)
    pub price: u64,

    /// Bid or Offer
    pub side: Side,

    /// Current size, mutated in place by modify
    pub size: u64,

    /// Book-wide sequence number assigned at add time.
    /// Within a price level, ascending sequence = time priority.
    pub sequence: u64,

    /// Next (newer) order in the price level queue (slab key)
    pub next: Option<usize>,

    /// Previous (older) order in the price level queue (slab key)
    pub prev: Option<usize>,
}

impl ResidentOrder {
    /// Create a resident order, not yet linked into a level.
    #[inline]
    pub fn new(id: u64, price: u64, side: Side, size: u64, sequence: u64) -> Self {
        Self {
            id,
            price,
            side,
            size,
            sequence,
            next: None,
            prev: None,
        }
    }

    /// Check if this resident is unlinked from any level queue.
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    /// Materialize a fresh boundary [`Order`] reflecting current state.
    ///
    /// Dumps hand these to callers so that nothing internal escapes.
    #[inline]
    pub fn to_order(&self) -> Order {
        Order::new(self.id, fixed_to_f64(self.price), self.side, self.size)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resident_new() {
        let resident = ResidentOrder::new(42, 9_550_000_000, Side::Bid, 5, 7);

        assert_eq!(resident.id, 42);
        assert_eq!(resident.price, 9_550_000_000);
        assert_eq!(resident.side, Side::Bid);
        assert_eq!(resident.size, 5);
        assert_eq!(resident.sequence, 7);
        assert!(resident.is_unlinked());
    }

    #[test]
    fn test_resident_to_order() {
        let resident = ResidentOrder::new(42, 9_550_000_000, Side::Bid, 5, 7);
        let order = resident.to_order();

        assert_eq!(order, Order::new(42, 95.5, Side::Bid, 5));
    }

    #[test]
    fn test_to_order_tracks_size_mutation() {
        let mut resident = ResidentOrder::new(42, 9_550_000_000, Side::Offer, 5, 7);
        resident.size = 9;

        assert_eq!(resident.to_order().size, 9);
    }

    #[test]
    fn test_resident_linking() {
        let mut resident = ResidentOrder::new(1, 9_550_000_000, Side::Bid, 5, 1);

        resident.next = Some(2);
        assert!(!resident.is_unlinked());

        resident.prev = Some(0);
        resident.next = None;
        assert!(!resident.is_unlinked());
    }
}
