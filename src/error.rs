/// Errors returned by the order-statistic and deletion operations of
/// [`RBTreeMap`](crate::RBTreeMap) and [`RBTreeSet`](crate::RBTreeSet).
///
/// Every operation that can fail checks its precondition before touching
/// the tree, so an `Err` always leaves the collection unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Error {
    /// The operation needs at least one entry.
    #[error("the collection is empty")]
    Empty,
    /// A rank outside `0..len` was requested.
    #[error("rank {rank} is out of range for a collection of length {len}")]
    RankOutOfRange {
        /// The requested rank.
        rank: usize,
        /// The length of the collection at the time of the request.
        len: usize,
    },
}

/// A broken red-black tree invariant, as reported by
/// [`RBTreeMap::check_invariants`](crate::RBTreeMap::check_invariants).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum InvariantViolation {
    /// The root link is red.
    #[error("the root link is red")]
    RedRoot,
    /// A node has a red right link.
    #[error("a red link leans right")]
    RightLeaningRed,
    /// A red link is followed by another red link.
    #[error("two consecutive red links")]
    ConsecutiveReds,
    /// A key is not strictly between the keys bounding its subtree.
    #[error("keys are out of order")]
    OutOfOrder,
    /// A node's stored subtree size does not match its actual size.
    #[error("stored subtree size {stored} does not match actual size {actual}")]
    SizeMismatch {
        /// The size stored in the node.
        stored: usize,
        /// The number of nodes actually in the subtree.
        actual: usize,
    },
    /// The two subtrees of a node have different black heights.
    #[error("unbalanced black heights: left {left}, right {right}")]
    BlackImbalance {
        /// The black height of the left subtree.
        left: usize,
        /// The black height of the right subtree.
        right: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn error_messages() {
        assert_eq!(Error::Empty.to_string(), "the collection is empty");
        assert_eq!(
            Error::RankOutOfRange { rank: 7, len: 3 }.to_string(),
            "rank 7 is out of range for a collection of length 3"
        );
        assert_eq!(
            InvariantViolation::BlackImbalance { left: 2, right: 1 }.to_string(),
            "unbalanced black heights: left 2, right 1"
        );
    }

    #[test]
    fn errors_are_core_errors() {
        fn assert_error<E: core::error::Error>(_: &E) {}
        assert_error(&Error::Empty);
        assert_error(&InvariantViolation::RedRoot);
    }
}
