//! Boundary order types.
//!
//! ## Boundary Value
//!
//! [`Order`] is the immutable value exchanged with callers: it enters
//! through [`OrderBook::add_order`](crate::OrderBook::add_order) and
//! comes back out of the dump operations. It is never stored as-is;
//! the book keeps its own resident representation and materializes
//! fresh `Order` values on the way out, so callers can retain them
//! without holding onto book internals.

use crate::error::BookError;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid (buy intent) or Offer (sell intent).
///
/// The legacy wire mapping is a single character, `'B'` or `'O'`,
/// preserved through `TryFrom<char>` for boundary compatibility:
///
/// ```
/// use limitbook::types::Side;
///
/// assert_eq!(Side::try_from('B'), Ok(Side::Bid));
/// assert_eq!(Side::try_from('O'), Ok(Side::Offer));
/// assert!(Side::try_from('X').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy intent - ranked with the highest price first
    Bid,
    /// Sell intent - ranked with the lowest price first
    Offer,
}

impl Side {
    /// The legacy character token for this side.
    pub fn as_char(self) -> char {
        match self {
            Side::Bid => 'B',
            Side::Offer => 'O',
        }
    }

    /// Returns the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }
}

impl TryFrom<char> for Side {
    type Error = BookError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'B' => Ok(Side::Bid),
            'O' => Ok(Side::Offer),
            other => Err(BookError::UnknownSide(other)),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An immutable limit order value.
///
/// Equality is structural across all four fields. `price` is a plain
/// `f64` at this boundary; the book converts it to an exact
/// fixed-point key internally (see [`crate::types::price`]).
///
/// ## Example
///
/// ```
/// use limitbook::types::{Order, Side};
///
/// let order = Order::new(123, 95.5, Side::Bid, 5);
/// assert_eq!(order.id, 123);
/// assert_eq!(order.price, 95.5);
/// assert_eq!(order.size, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    /// Unique order identifier, shared across both sides
    pub id: u64,

    /// Limit price
    pub price: f64,

    /// Bid or Offer
    pub side: Side,

    /// Order size, always >= 1 once resident
    pub size: u64,
}

impl Order {
    /// Create a new order value.
    pub fn new(id: u64, price: f64, side: Side, size: u64) -> Self {
        Self { id, price, side, size }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
