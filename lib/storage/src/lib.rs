//! # Row Storage
//!
//! In-memory row storage primitives: the [`Row`] cell map and the exact-match
//! [`HashIndex`]. Tables own a sequence of rows; a row's identifier is its
//! ordinal position in that sequence, so identifiers shift whenever an
//! earlier row is removed. That is why every index is fully rebuilt after any
//! row removal (see [`HashIndex::rebuild`]).

pub mod index;
pub mod row;

pub use index::*;
pub use row::*;
