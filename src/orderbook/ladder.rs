//! Side ladder: the sorted set of price levels for one side.
//!
//! ## Design
//!
//! One generic implementation serves both sides instead of two copies
//! of the ladder code: the `BTreeMap` key type carries the side's
//! comparator. Bids use `Reverse<u64>` so the highest price ranks
//! first; offers use plain `u64` so the lowest price ranks first. The
//! [`PriceKey`] trait converts between the map key and the fixed-point
//! price it wraps.
//!
//! ## Rank Lookups
//!
//! `price_at`/`size_at` walk the map in comparator order until the
//! requested 1-based rank is reached, so they are O(rank). Adds and
//! cancels are the hot path here; rank queries are assumed rarer, and
//! memoizing prefix data would tax every mutation to speed them up.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use slab::Slab;
use tracing::debug;

use crate::error::{BookError, Result};
use crate::orderbook::{PriceLevel, ResidentOrder};
use crate::types::price::fixed_to_f64;
use crate::types::Order;

// ============================================================================
// PriceKey trait
// ============================================================================

/// Map key carrying one side's price comparator.
///
/// `Ord` on the key type defines the side's rank order: rank 1 is the
/// smallest key.
pub trait PriceKey: Copy + Ord {
    /// Wrap a fixed-point price as a map key.
    fn from_fixed(price: u64) -> Self;

    /// Unwrap the fixed-point price.
    fn to_fixed(self) -> u64;
}

/// Offer side: lowest price ranks first.
impl PriceKey for u64 {
    #[inline]
    fn from_fixed(price: u64) -> Self {
        price
    }

    #[inline]
    fn to_fixed(self) -> u64 {
        self
    }
}

/// Bid side: highest price ranks first.
impl PriceKey for Reverse<u64> {
    #[inline]
    fn from_fixed(price: u64) -> Self {
        Reverse(price)
    }

    #[inline]
    fn to_fixed(self) -> u64 {
        self.0
    }
}

// ============================================================================
// Ladder
// ============================================================================

/// The sorted collection of price levels for one side.
///
/// Invariant: every level in the map holds at least one order. The
/// ladder pull-checks after each removal and retires the level the
/// instant it empties.
#[derive(Debug, Clone)]
pub struct Ladder<K: PriceKey> {
    /// Price levels in comparator order (best first)
    levels: BTreeMap<K, PriceLevel>,

    /// Total number of orders across all levels
    order_count: usize,
}

impl<K: PriceKey> Default for Ladder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PriceKey> Ladder<K> {
    /// Create an empty ladder.
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
            order_count: 0,
        }
    }

    /// Number of distinct price levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Total number of orders on this side.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Best (rank 1) price, if the side is non-empty.
    #[inline]
    pub fn best(&self) -> Option<u64> {
        self.levels.keys().next().map(|k| k.to_fixed())
    }

    /// The level at an exact fixed-point price, if present.
    #[inline]
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&K::from_fixed(price))
    }

    /// Mutable access to the level at an exact fixed-point price.
    #[inline]
    pub fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&K::from_fixed(price))
    }

    /// Link an already-inserted resident into its price level,
    /// creating the level on demand.
    ///
    /// The resident's price is read back from the slab so the level
    /// key always matches the stored record.
    pub fn insert(&mut self, key: usize, slab: &mut Slab<ResidentOrder>) {
        let price = slab.get(key).expect("Invalid slab key").price;

        let level = self.levels.entry(K::from_fixed(price)).or_insert_with(|| {
            debug!(price = fixed_to_f64(price), "price level created");
            PriceLevel::new(price)
        });
        level.push_back(key, slab);
        self.order_count += 1;
    }

    /// Delink a resident from the level at `price`, retiring the level
    /// if it empties.
    ///
    /// # Returns
    ///
    /// The size of the removed order.
    pub fn remove(&mut self, price: u64, key: usize, slab: &mut Slab<ResidentOrder>) -> u64 {
        let map_key = K::from_fixed(price);
        let level = self
            .levels
            .get_mut(&map_key)
            .expect("No level at resident price");

        let size = level.remove(key, slab);
        self.order_count -= 1;

        if level.is_empty() {
            self.levels.remove(&map_key);
            debug!(price = fixed_to_f64(price), "price level retired");
        }

        size
    }

    /// Price of the `rank`-th best level, 1-based.
    ///
    /// Returns `f64::NAN` if fewer than `rank` levels exist; fails
    /// with [`BookError::InvalidLevel`] for rank 0.
    pub fn price_at(&self, rank: usize) -> Result<f64> {
        if rank == 0 {
            return Err(BookError::InvalidLevel(rank));
        }

        Ok(self
            .levels
            .keys()
            .nth(rank - 1)
            .map(|k| fixed_to_f64(k.to_fixed()))
            .unwrap_or(f64::NAN))
    }

    /// Aggregate size of the `rank`-th best level, 1-based.
    ///
    /// Returns `0` if fewer than `rank` levels exist; fails with
    /// [`BookError::InvalidLevel`] for rank 0.
    pub fn size_at(&self, rank: usize) -> Result<u64> {
        if rank == 0 {
            return Err(BookError::InvalidLevel(rank));
        }

        Ok(self
            .levels
            .values()
            .nth(rank - 1)
            .map(|level| level.total_size)
            .unwrap_or(0))
    }

    /// Stream every order on this side in rank order and, within each
    /// level, oldest first.
    pub fn dump<F>(&self, slab: &Slab<ResidentOrder>, sink: &mut F)
    where
        F: FnMut(Order),
    {
        for level in self.levels.values() {
            level.dump(slab, sink);
        }
    }

    /// Assert the ladder's structural invariants. Test support.
    ///
    /// # Panics
    ///
    /// Panics if any level is empty, any level key disagrees with the
    /// level's price, any queue breaks ascending-sequence order, or
    /// any cached total diverges from the recomputed sum.
    pub fn check_integrity(&self, slab: &Slab<ResidentOrder>) {
        let mut counted = 0;

        for (map_key, level) in &self.levels {
            assert!(!level.is_empty(), "empty level left in ladder");
            assert_eq!(map_key.to_fixed(), level.price, "level keyed at wrong price");

            let mut total = 0u64;
            let mut last_sequence = 0u64;
            let mut cursor = level.head;
            let mut walked = 0;

            while let Some(slab_key) = cursor {
                let node = slab.get(slab_key).expect("queue points at vacant slot");
                assert_eq!(node.price, level.price, "resident filed at wrong level");
                assert!(
                    node.sequence > last_sequence,
                    "sequence order violated within level"
                );
                last_sequence = node.sequence;
                total += node.size;
                walked += 1;
                cursor = node.next;
            }

            assert_eq!(walked, level.order_count, "queue length mismatch");
            assert_eq!(total, level.total_size, "cached total size out of date");
            counted += walked;
        }

        assert_eq!(counted, self.order_count, "ladder order count mismatch");
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
