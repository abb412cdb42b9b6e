//! Node capacity type.

use std::fmt;

use crate::common::config::{DEFAULT_CAPACITY, MIN_CAPACITY};
use crate::common::{Error, Result};

/// Maximum number of keys a single node may hold.
///
/// Capacity is always even, so a node that overflows to `C + 1` keys
/// splits into two halves that both meet the minimum occupancy of
/// `C / 2`, and two nodes at the minimum (minus one) always fit back
/// into one node when merged.
///
/// # Example
/// ```
/// use bplustree::Capacity;
///
/// let capacity = Capacity::new(4).unwrap();
/// assert_eq!(capacity.max_keys(), 4);
/// assert_eq!(capacity.min_occupancy(), 2);
///
/// assert!(Capacity::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity(usize);

impl Capacity {
    /// Capacity used when none is given.
    pub const DEFAULT: Capacity = Capacity(DEFAULT_CAPACITY);

    /// Create a validated capacity.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `max_keys` is odd or below [`MIN_CAPACITY`]
    pub fn new(max_keys: usize) -> Result<Self> {
        if max_keys < MIN_CAPACITY || max_keys % 2 != 0 {
            return Err(Error::InvalidCapacity(max_keys));
        }
        Ok(Capacity(max_keys))
    }

    /// Maximum key count of any node.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.0
    }

    /// Minimum key count of any non-root node, `⌈C / 2⌉`.
    #[inline]
    pub fn min_occupancy(&self) -> usize {
        self.0.div_ceil(2)
    }

    /// True if a node holding `len` keys must be split.
    #[inline]
    pub(crate) fn overflows(&self, len: usize) -> bool {
        len > self.0
    }

    /// True if a non-root node holding `len` keys must be rebalanced.
    #[inline]
    pub(crate) fn underflows(&self, len: usize) -> bool {
        len < self.min_occupancy()
    }

    /// True if a sibling holding `len` keys can give one away.
    #[inline]
    pub(crate) fn can_lend(&self, len: usize) -> bool {
        len > self.min_occupancy()
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Capacity {
    type Error = Error;

    fn try_from(max_keys: usize) -> Result<Self> {
        Capacity::new(max_keys)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity({})", self.0)
    }
}
