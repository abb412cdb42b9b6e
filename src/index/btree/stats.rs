//! Structural operation counters.

use std::fmt;

/// Counts of the structural changes a tree has gone through.
///
/// The tree is single-owner, so these are plain counters bumped through
/// `&mut self`; copy the struct out to keep a point-in-time snapshot.
///
/// # Example
/// ```
/// use bplustree::BPlusTree;
///
/// let mut tree = BPlusTree::new(2).unwrap();
/// for key in 0..3 {
///     tree.insert(key, key.to_string());
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.leaf_splits, 1);
/// assert_eq!(stats.root_promotions, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Leaves split after an insert overflowed them.
    pub leaf_splits: u64,

    /// Inner nodes split after a separator insert overflowed them.
    pub inner_splits: u64,

    /// Times a split reached the root and the tree grew a level.
    pub root_promotions: u64,

    /// Underfull nodes refilled from their left sibling.
    pub borrows_left: u64,

    /// Underfull nodes refilled from their right sibling.
    pub borrows_right: u64,

    /// Underfull nodes merged with a sibling.
    pub merges: u64,

    /// Times a keyless inner root was replaced by its only child.
    pub root_collapses: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total splits at any level.
    pub fn splits(&self) -> u64 {
        self.leaf_splits + self.inner_splits
    }

    /// Total borrows from either side.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, promotions: {}, borrows: {}, merges: {}, collapses: {} }}",
            self.splits(),
            self.root_promotions,
            self.borrows(),
            self.merges,
            self.root_collapses
        )
    }
}
