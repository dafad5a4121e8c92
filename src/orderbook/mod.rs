//! Order book module.
//!
//! ## Architecture
//!
//! The book is built from four pieces:
//!
//! - [`ResidentOrder`]: slab-stored live order with queue links
//! - [`PriceLevel`]: FIFO queue of residents at one price, with a
//!   cached aggregate size
//! - [`Ladder`]: the sorted levels for one side, comparator carried
//!   by the map key type (bids descending, offers ascending)
//! - [`OrderBook`]: the two ladders plus the id index and sequence
//!   counter
//!
//! ## Performance
//!
//! | Operation           | Complexity |
//! |---------------------|------------|
//! | Add order           | O(log P)   |
//! | Remove by id        | O(log P)   |
//! | Modify size         | O(log P)   |
//! | Best price          | O(log P)   |
//! | Price/size at rank r| O(r)       |
//! | Dump one side       | O(n)       |
//!
//! P = distinct price levels on the side. Rank lookups iterate on
//! purpose: mutations are assumed to dominate rank queries.

pub mod book;
pub mod ladder;
pub mod level;
pub mod node;

pub use book::OrderBook;
pub use ladder::{Ladder, PriceKey};
pub use level::PriceLevel;
pub use node::ResidentOrder;
