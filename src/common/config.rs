//! Configuration constants for the B+ tree.

/// Capacity used by [`BPlusTree::default`](crate::BPlusTree).
///
/// Four keys per node keeps trees shallow enough to reason about by hand
/// while still exercising every split, borrow and merge path.
pub const DEFAULT_CAPACITY: usize = 4;

/// Smallest capacity a tree can be built with.
///
/// Capacity must be even, so 2 is the first value where a node can hold
/// a key at all while splitting into two halves of `C / 2`.
pub const MIN_CAPACITY: usize = 2;
