use thiserror::Error;

/// Errors raised by the ordered index and the types stored in it.
///
/// These are distinct from "not found", which lookups report as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A key was built from input that normalizes to nothing
    #[error("entry key cannot be empty")]
    MissingKey,
    /// A traversal cursor was advanced past its last entry
    #[error("no more entries in traversal")]
    Exhausted,
}

/// Visiting order for a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree (ascending keys)
    InOrder,
    /// Node, left subtree, right subtree
    PreOrder,
    /// Left subtree, right subtree, node
    PostOrder,
}

/// Reasons a pre-order shape listing cannot be turned back into a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("node claims a child that the listing does not contain")]
    MissingChild,
    #[error("listing contains more than one tree")]
    DetachedSubtree,
    #[error("keys are not in strictly ascending order")]
    OutOfOrder,
}
