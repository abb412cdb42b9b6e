//! The B+ tree and its lookup engine.

use std::fmt;

use crate::common::{Capacity, Error, Key, Result};
use crate::index::btree::node::{check_sorted, InnerNode, LeafNode, Node};
use crate::index::btree::TreeStats;

/// An in-memory B+ tree mapping integer keys to string values.
///
/// # Structure
/// ```text
///                     root: [5]
///                    /         \
///            [3]                   [7]
///           /    \                /    \
///   [1: a, 2: b] [3: c, 4: d]  [5: e]..  [7: g, 8: h]
/// ```
///
/// - Values live only in leaves; inner keys are separators.
/// - Every leaf sits at the same depth.
/// - Every node except the root holds between `C / 2` and `C` keys.
/// - The tree owns the root, and each node owns its children. Mutations
///   record the descent as a path of child indices instead of keeping
///   parent pointers.
///
/// # Usage
/// ```
/// use bplustree::BPlusTree;
///
/// let mut tree = BPlusTree::new(4).unwrap();
/// tree.insert(1, "a".to_string());
/// tree.insert(2, "b".to_string());
///
/// assert_eq!(tree.lookup(2), Some("b"));
/// assert_eq!(tree.delete(1), Some("a".to_string()));
/// assert_eq!(tree.lookup(1), None);
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Sole owner of the whole node graph.
    pub(super) root: Node,

    /// Maximum keys per node (immutable after construction).
    pub(super) capacity: Capacity,

    /// Number of stored entries.
    pub(super) len: usize,

    /// Structural operation counters.
    pub(super) stats: TreeStats,
}

impl BPlusTree {
    /// Create an empty tree whose nodes hold at most `capacity` keys.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity` is odd or zero
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Create an empty tree from an already validated capacity.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            root: Node::empty_leaf(),
            capacity,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    /// Adopt a hand-built node graph as a tree.
    ///
    /// Every structural invariant is checked against `capacity`, so a
    /// malformed fixture is rejected here rather than surfacing later as
    /// a wrong lookup.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity` is odd or zero
    /// - Any invariant error reported by [`BPlusTree::validate`]
    ///
    /// # Example
    /// ```
    /// use bplustree::{BPlusTree, Node};
    ///
    /// let root = Node::inner(
    ///     vec![3],
    ///     vec![
    ///         Node::leaf(vec![1, 2], vec!["a".into(), "b".into()]).unwrap(),
    ///         Node::leaf(vec![3, 4], vec!["c".into(), "d".into()]).unwrap(),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// let tree = BPlusTree::with_root(root, 4).unwrap();
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.lookup(1), Some("a"));
    /// ```
    pub fn with_root(root: Node, capacity: usize) -> Result<Self> {
        let capacity = Capacity::new(capacity)?;
        let len = check_tree(&root, capacity)?;
        Ok(Self {
            root,
            capacity,
            len,
            stats: TreeStats::new(),
        })
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Value stored under `key`, or `None` if the key is absent.
    pub fn lookup(&self, key: Key) -> Option<&str> {
        self.find_leaf(key).get(key).map(String::as_str)
    }

    /// True if `key` is stored in the tree.
    pub fn contains_key(&self, key: Key) -> bool {
        self.find_leaf(key).search(key).is_ok()
    }

    // ========================================================================
    // Public API: Inspection
    // ========================================================================

    /// Read-only access to the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels; a lone leaf root is height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Node::Inner(inner) = node {
            node = &inner.children[0];
            height += 1;
        }
        height
    }

    /// Structural operation counters since creation or the last reset.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Check every structural invariant.
    ///
    /// # Errors
    /// Returns the first violation found, walking depth-first from the root:
    /// - `Error::Overfull` / `Error::Underfull` for occupancy
    /// - `Error::UnsortedKeys` for ordering within a node
    /// - `Error::EmptyInnerNode` / `Error::KeyChildCountMismatch` /
    ///   `Error::KeyValueCountMismatch` for node shape
    /// - `Error::UnevenLeafDepth` if leaves are not all on one level
    /// - `Error::SeparatorViolation` if a key is outside its separator range
    pub fn validate(&self) -> Result<()> {
        check_tree(&self.root, self.capacity).map(drop)
    }

    // ========================================================================
    // Internal: Descent
    // ========================================================================

    /// The leaf whose key range contains `key`.
    fn find_leaf(&self, key: Key) -> &LeafNode {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf,
                Node::Inner(inner) => node = &inner.children[inner.child_index(key)],
            }
        }
    }
}

impl Default for BPlusTree {
    fn default() -> Self {
        Self::with_capacity(Capacity::DEFAULT)
    }
}

/// Structural equality: same capacity and node-for-node identical contents.
///
/// Statistics are history, not structure, and are ignored.
impl PartialEq for BPlusTree {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity && self.root == other.root
    }
}

impl Eq for BPlusTree {}

impl fmt::Display for BPlusTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Walk from `node` to the leaf containing `key`, pushing the index of
/// every child taken onto `path` (root's choice first).
pub(super) fn descend_mut<'a>(
    mut node: &'a mut Node,
    key: Key,
    path: &mut Vec<usize>,
) -> &'a mut LeafNode {
    loop {
        node = match node {
            Node::Leaf(leaf) => return leaf,
            Node::Inner(inner) => {
                let index = inner.child_index(key);
                path.push(index);
                inner.child_mut(index)
            }
        };
    }
}

/// The inner node reached by following `path` down from `node`.
///
/// # Panics
/// Panics if the path runs through or ends at a leaf; paths come from
/// [`descend_mut`] and always stop one level above the leaves.
pub(super) fn inner_at_mut<'a>(mut node: &'a mut Node, path: &[usize]) -> &'a mut InnerNode {
    for &index in path {
        node = match node {
            Node::Inner(inner) => inner.child_mut(index),
            Node::Leaf(_) => panic!("descent path runs through a leaf"),
        };
    }
    match node {
        Node::Inner(inner) => inner,
        Node::Leaf(_) => panic!("descent path ends at a leaf"),
    }
}

/// Check the tree rooted at `root`, returning its entry count.
fn check_tree(root: &Node, capacity: Capacity) -> Result<usize> {
    let mut leaf_depth = None;
    check_node(root, capacity, 0, (None, None), &mut leaf_depth)
}

/// Check one subtree whose keys must fall in `[lower, upper)`.
fn check_node(
    node: &Node,
    capacity: Capacity,
    depth: usize,
    (lower, upper): (Option<Key>, Option<Key>),
    leaf_depth: &mut Option<usize>,
) -> Result<usize> {
    let len = node.len();
    if capacity.overflows(len) {
        return Err(Error::Overfull {
            len,
            capacity: capacity.max_keys(),
        });
    }
    // the root is exempt from minimum occupancy
    if depth > 0 && capacity.underflows(len) {
        return Err(Error::Underfull {
            len,
            min: capacity.min_occupancy(),
        });
    }
    check_sorted(node.keys())?;

    match node {
        Node::Leaf(leaf) => {
            if leaf.keys.len() != leaf.values.len() {
                return Err(Error::KeyValueCountMismatch {
                    keys: leaf.keys.len(),
                    values: leaf.values.len(),
                });
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::UnevenLeafDepth {
                        expected,
                        found: depth,
                    })
                }
                Some(_) => {}
            }
            for &key in &leaf.keys {
                if let Some(separator) = lower.filter(|&separator| key < separator) {
                    return Err(Error::SeparatorViolation { separator, key });
                }
                if let Some(separator) = upper.filter(|&separator| key >= separator) {
                    return Err(Error::SeparatorViolation { separator, key });
                }
            }
            Ok(leaf.len())
        }
        Node::Inner(inner) => {
            if inner.keys.is_empty() {
                return Err(Error::EmptyInnerNode);
            }
            if inner.children.len() != inner.keys.len() + 1 {
                return Err(Error::KeyChildCountMismatch {
                    keys: inner.keys.len(),
                    children: inner.children.len(),
                });
            }
            let mut entries = 0;
            for (i, child) in inner.children.iter().enumerate() {
                let child_lower = if i == 0 { lower } else { Some(inner.keys[i - 1]) };
                let child_upper = inner.keys.get(i).copied().or(upper);
                entries += check_node(
                    child,
                    capacity,
                    depth + 1,
                    (child_lower, child_upper),
                    leaf_depth,
                )?;
            }
            Ok(entries)
        }
    }
}
