use thiserror::Error;

/// A structural problem found by [`Tree::check_invariants`][crate::Tree::check_invariants].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvariantError {
    /// An element compares less than the element visited just before it in an in-order walk.
    #[error("element at in-order position {position} is smaller than its predecessor")]
    OutOfOrder {
        /// Zero-based in-order index of the offending element.
        position: usize,
    },
    /// The tree's cached length disagrees with the number of nodes reachable from the root.
    #[error("tree records {recorded} elements but {counted} are reachable")]
    LengthMismatch {
        /// The length the tree reports through [`Tree::len`][crate::Tree::len].
        recorded: usize,
        /// The number of nodes actually visited.
        counted: usize,
    },
}
