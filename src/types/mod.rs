//! Core data types for the limit order book.
//!
//! ## Types
//!
//! - [`Order`]: the immutable boundary value (id, price, side, size)
//! - [`Side`]: Bid or Offer
//! - [`price`]: fixed-point price keys and boundary conversions
//!
//! ## Fixed-Point Prices
//!
//! Boundary prices are `f64`; internally every price is a `u64` key
//! scaled by 10^8. Example: 95.70 is keyed as 9_570_000_000.

mod order;
pub mod price;

// Re-export the boundary types at module level
pub use order::{Order, Side};
