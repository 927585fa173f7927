//! Generic ordered index.
//!
//! An unbalanced binary search tree that owns its nodes outright: every node
//! holds one key and at most two boxed children, with no parent links. Keys
//! are ordered by their [`Ord`] implementation and duplicates are rejected.
//!
//! - [`ordered`] - the tree itself (insert, search, extremal removal, height)
//! - [`traversal`] - buffered one-shot cursors for the three visiting orders
//! - [`types`] - error types and the traversal order enum

pub mod ordered;
pub mod traversal;
pub mod types;

pub use ordered::{NodeShape, OrderedIndex};
pub use traversal::Traversal;
pub use types::*;
