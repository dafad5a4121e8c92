//! # limitbook
//!
//! In-memory limit order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Types**: boundary [`Order`] value, [`Side`], fixed-point price
//!   conversion
//! - **OrderBook**: dual price-ordered ladders with per-level FIFO
//!   queues, slab-backed storage, and an id index for O(1)-by-id
//!   cancel and modify
//!
//! ## What It Is Not
//!
//! This is a book, not a matching engine: crossing bids and offers
//! rest side by side and no trade is ever produced. There is no
//! persistence and no thread safety; a book instance belongs to one
//! thread, and every operation completes synchronously within its own
//! call frame.
//!
//! ## Example
//!
//! ```
//! use limitbook::{Order, OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! book.add_order(Order::new(123, 95.5, Side::Bid, 5)).unwrap();
//! book.add_order(Order::new(124, 95.7, Side::Bid, 3)).unwrap();
//! book.add_order(Order::new(127, 96.5, Side::Offer, 4)).unwrap();
//!
//! // Top of book
//! assert_eq!(book.price_at(Side::Bid, 1).unwrap(), 95.7);
//! assert_eq!(book.size_at(Side::Offer, 1).unwrap(), 4);
//!
//! // Per-order enumeration in price/time priority
//! let bids = book.orders(Side::Bid);
//! assert_eq!(bids[0].id, 124);
//!
//! // Size modification keeps time priority
//! book.modify_size(124, 9).unwrap();
//! assert_eq!(book.orders(Side::Bid)[0].size, 9);
//!
//! // Unknown ids are a non-fatal false
//! assert!(!book.remove_order(999));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy
pub mod error;

/// Order book: ladders, levels, resident storage
pub mod orderbook;

/// Boundary data types and price conversion
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{BookError, Result};
pub use orderbook::{Ladder, OrderBook, PriceLevel, ResidentOrder};
pub use types::{Order, Side};
