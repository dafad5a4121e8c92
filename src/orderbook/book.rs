//! The order book aggregate.
//!
//! ## Architecture
//!
//! `OrderBook` glues the pieces together with a hybrid data structure:
//!
//! - **Slab**: pre-allocated storage for every resident order
//! - **Two ladders**: `BTreeMap`-backed price levels, bids descending
//!   and offers ascending
//! - **HashMap**: order id to slab key, for O(1) cancel and modify
//!
//! This is *not* a matching engine. Bids and offers coexist even when
//! they cross, and no operation ever produces a trade. The book is
//! single-threaded; embedders that need sharing must serialize access
//! externally.
//!
//! ## Failure Semantics
//!
//! Every fallible operation validates before touching any state, so a
//! returned error means the book is exactly as it was before the call.
//!
//! ## Example
//!
//! ```
//! use limitbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! book.add_order(Order::new(1, 95.5, Side::Bid, 5)).unwrap();
//! book.add_order(Order::new(2, 96.5, Side::Offer, 4)).unwrap();
//!
//! assert_eq!(book.price_at(Side::Bid, 1).unwrap(), 95.5);
//! assert_eq!(book.size_at(Side::Offer, 1).unwrap(), 4);
//! assert!(book.remove_order(1));
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;

use slab::Slab;
use tracing::trace;

use crate::error::{BookError, Result};
use crate::orderbook::{Ladder, PriceLevel, ResidentOrder};
use crate::types::price::{f64_to_fixed, fixed_to_f64};
use crate::types::{Order, Side};

/// In-memory limit order book for a single instrument.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    /// Pre-allocated storage for all resident orders, both sides
    orders: Slab<ResidentOrder>,

    /// Bid ladder (price descending)
    bids: Ladder<Reverse<u64>>,

    /// Offer ladder (price ascending)
    offers: Ladder<u64>,

    /// Order id to slab key, shared across both sides
    order_index: HashMap<u64, usize>,

    /// Last sequence number handed out; incremented on every
    /// successful add and stamped on the new resident
    next_sequence: u64,
}

impl OrderBook {
    /// Create a new empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with pre-allocated capacity for `order_capacity`
    /// resident orders.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: Ladder::new(),
            offers: Ladder::new(),
            order_index: HashMap::with_capacity(order_capacity),
            next_sequence: 0,
        }
    }

    // ========================================================================
    // Mutating Operations
    // ========================================================================

    /// Insert an order on the side and price it names.
    ///
    /// A sequence number is allocated only on success, so failed adds
    /// leave no gap in time priority.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidSize`] if `order.size < 1`
    /// - [`BookError::InvalidPrice`] if the price has no fixed-point
    ///   representation (NaN, negative, out of range)
    /// - [`BookError::DuplicateId`] if the id is already resident
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        if order.size < 1 {
            return Err(BookError::InvalidSize(order.size));
        }

        let price = f64_to_fixed(order.price).ok_or(BookError::InvalidPrice(order.price))?;

        if self.order_index.contains_key(&order.id) {
            return Err(BookError::DuplicateId(order.id));
        }

        self.next_sequence += 1;
        let sequence = self.next_sequence;

        let resident = ResidentOrder::new(order.id, price, order.side, order.size, sequence);
        let key = self.orders.insert(resident);
        self.order_index.insert(order.id, key);

        match order.side {
            Side::Bid => self.bids.insert(key, &mut self.orders),
            Side::Offer => self.offers.insert(key, &mut self.orders),
        }

        trace!(
            id = order.id,
            price = order.price,
            side = ?order.side,
            size = order.size,
            sequence,
            "order added"
        );
        Ok(())
    }

    /// Remove the order with this id.
    ///
    /// Returns `false` if no such order is resident; an unknown id is
    /// not an error. On success the order is delinked from its level,
    /// the level is retired if it empties, and the id leaves the index.
    pub fn remove_order(&mut self, id: u64) -> bool {
        let key = match self.order_index.remove(&id) {
            Some(key) => key,
            None => return false,
        };

        let node = self.orders.get(key).expect("index points at vacant slot");
        let price = node.price;
        let side = node.side;

        match side {
            Side::Bid => self.bids.remove(price, key, &mut self.orders),
            Side::Offer => self.offers.remove(price, key, &mut self.orders),
        };

        self.orders.remove(key);
        trace!(id, "order removed");
        true
    }

    /// Update the size of the resident order with this id.
    ///
    /// The order's sequence and queue position are untouched, so its
    /// time priority is preserved. Price and side cannot be modified.
    ///
    /// # Errors
    ///
    /// - [`BookError::InvalidSize`] if `new_size < 1`
    /// - [`BookError::UnknownId`] if no such order is resident
    pub fn modify_size(&mut self, id: u64, new_size: u64) -> Result<()> {
        if new_size < 1 {
            return Err(BookError::InvalidSize(new_size));
        }

        let key = *self.order_index.get(&id).ok_or(BookError::UnknownId(id))?;

        let node = self.orders.get_mut(key).expect("index points at vacant slot");
        let old_size = node.size;
        let price = node.price;
        let side = node.side;
        node.size = new_size;

        // Keep the level's cached aggregate in step with the resident
        let level = match side {
            Side::Bid => self.bids.level_mut(price),
            Side::Offer => self.offers.level_mut(price),
        }
        .expect("No level at resident price");
        level.update_size(old_size, new_size);

        trace!(id, old_size, new_size, "order size modified");
        Ok(())
    }

    /// Drop every order from the book.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids = Ladder::new();
        self.offers = Ladder::new();
        self.order_index.clear();
    }

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Price of the `rank`-th best level on `side`, 1-based.
    ///
    /// Returns `f64::NAN` when fewer than `rank` levels exist; detect
    /// absence with [`f64::is_nan`], not equality.
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidLevel`] for rank 0.
    pub fn price_at(&self, side: Side, rank: usize) -> Result<f64> {
        match side {
            Side::Bid => self.bids.price_at(rank),
            Side::Offer => self.offers.price_at(rank),
        }
    }

    /// Aggregate size of the `rank`-th best level on `side`, 1-based.
    ///
    /// Returns `0` when fewer than `rank` levels exist.
    ///
    /// # Errors
    ///
    /// [`BookError::InvalidLevel`] for rank 0.
    pub fn size_at(&self, side: Side, rank: usize) -> Result<u64> {
        match side {
            Side::Bid => self.bids.size_at(rank),
            Side::Offer => self.offers.size_at(rank),
        }
    }

    /// All orders on `side` as freshly built boundary values, levels
    /// in rank order and oldest first within each level.
    pub fn orders(&self, side: Side) -> Vec<Order> {
        let mut orders = Vec::with_capacity(128);
        self.dump_orders(side, |order| orders.push(order));
        orders
    }

    /// Stream `side`'s orders to `sink` in the same order as
    /// [`orders`](Self::orders), without building a collection.
    pub fn dump_orders<F>(&self, side: Side, mut sink: F)
    where
        F: FnMut(Order),
    {
        match side {
            Side::Bid => self.bids.dump(&self.orders, &mut sink),
            Side::Offer => self.offers.dump(&self.orders, &mut sink),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Total number of resident orders across both sides.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book holds no orders at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Check if an order with this id is resident.
    #[inline]
    pub fn contains_order(&self, id: u64) -> bool {
        self.order_index.contains_key(&id)
    }

    /// Number of distinct bid price levels.
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of distinct offer price levels.
    #[inline]
    pub fn offer_levels(&self) -> usize {
        self.offers.level_count()
    }

    /// Best bid price, if any bids are resident.
    #[inline]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best().map(fixed_to_f64)
    }

    /// Best offer price, if any offers are resident.
    #[inline]
    pub fn best_offer(&self) -> Option<f64> {
        self.offers.best().map(fixed_to_f64)
    }

    /// The level at an exact price on `side`, if present.
    pub fn level_at_price(&self, side: Side, price: f64) -> Option<&PriceLevel> {
        let price = f64_to_fixed(price)?;
        match side {
            Side::Bid => self.bids.level(price),
            Side::Offer => self.offers.level(price),
        }
    }

    /// Assert every book invariant. Test support.
    ///
    /// Checks the id index against the slab, the side partition, both
    /// ladders' structure, and the cached aggregates.
    ///
    /// # Panics
    ///
    /// Panics on any violation.
    pub fn check_integrity(&self) {
        assert_eq!(
            self.order_index.len(),
            self.orders.len(),
            "index and slab disagree on order count"
        );

        for (&id, &key) in &self.order_index {
            let node = self.orders.get(key).expect("index points at vacant slot");
            assert_eq!(node.id, id, "index entry resolves to wrong order");

            // The resident must be filed in a level on its own side
            let level = match node.side {
                Side::Bid => self.bids.level(node.price),
                Side::Offer => self.offers.level(node.price),
            };
            assert!(level.is_some(), "resident has no level on its side");
        }

        self.bids.check_integrity(&self.orders);
        self.offers.check_integrity(&self.orders);

        assert_eq!(
            self.bids.order_count() + self.offers.order_count(),
            self.orders.len(),
            "side partition does not cover the slab"
        );
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
