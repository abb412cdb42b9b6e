//! Error types for the B+ tree.

use thiserror::Error;

use crate::common::Key;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way building or checking a tree can fail.
///
/// Looking up or deleting an absent key is not an error; those operations
/// return `None`. The variants here describe trees that must never exist:
/// a bad capacity, or a hand-built node that breaks a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Capacity was odd or smaller than the minimum.
    #[error("invalid capacity {0}: must be even and at least 2")]
    InvalidCapacity(usize),

    /// A leaf was given a different number of keys and values.
    #[error("leaf has {keys} keys but {values} values")]
    KeyValueCountMismatch { keys: usize, values: usize },

    /// An inner node was given a child count other than key count + 1.
    #[error("inner node has {keys} keys but {children} children")]
    KeyChildCountMismatch { keys: usize, children: usize },

    /// Keys within a node are not strictly ascending.
    #[error("keys not strictly ascending: {previous} followed by {next}")]
    UnsortedKeys { previous: Key, next: Key },

    /// A node holds more keys than the capacity allows.
    #[error("node holds {len} keys, capacity is {capacity}")]
    Overfull { len: usize, capacity: usize },

    /// A non-root node holds fewer keys than the minimum occupancy.
    #[error("non-root node holds {len} keys, minimum is {min}")]
    Underfull { len: usize, min: usize },

    /// An inner node has no keys (and therefore a single child).
    #[error("inner node has no keys")]
    EmptyInnerNode,

    /// Leaves were found at different depths.
    #[error("leaf found at depth {found}, expected {expected}")]
    UnevenLeafDepth { expected: usize, found: usize },

    /// A key sits on the wrong side of an ancestor's separator.
    #[error("key {key} is on the wrong side of separator {separator}")]
    SeparatorViolation { separator: Key, key: Key },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCapacity(3);
        assert_eq!(
            format!("{}", err),
            "invalid capacity 3: must be even and at least 2"
        );

        let err = Error::KeyChildCountMismatch {
            keys: 2,
            children: 2,
        };
        assert_eq!(format!("{}", err), "inner node has 2 keys but 2 children");

        let err = Error::SeparatorViolation {
            separator: 5,
            key: 4,
        };
        assert_eq!(
            format!("{}", err),
            "key 4 is on the wrong side of separator 5"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_std_error::<Error>();
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
