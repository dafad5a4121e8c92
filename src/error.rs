//! Error types for the limit order book.
//!
//! Every failure leaves the book exactly as it was before the call;
//! no operation is partially applied.

use thiserror::Error;

/// Order book errors.
///
/// Each variant corresponds to one rejected operation. Absent lookups
/// that are not errors (removing an unknown id, querying a rank beyond
/// the ladder depth) are reported through return values instead.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BookError {
    /// The incoming order id is already resident in the book.
    #[error("duplicate order id {0}")]
    DuplicateId(u64),

    /// A size below 1 was supplied to add or modify.
    #[error("invalid order size {0}")]
    InvalidSize(u64),

    /// No resident order with this id.
    #[error("no order {0}")]
    UnknownId(u64),

    /// A non-positive ladder rank was requested.
    #[error("bad level {0}")]
    InvalidLevel(usize),

    /// A side token other than 'B' or 'O'.
    #[error("unknown side {0}")]
    UnknownSide(char),

    /// A boundary price that cannot be represented as a fixed-point
    /// key (NaN, negative, or out of range).
    #[error("unrepresentable price {0}")]
    InvalidPrice(f64),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BookError>;
