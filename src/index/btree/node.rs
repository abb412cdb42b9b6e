//! Tree nodes.
//!
//! A [`Node`] is either a [`LeafNode`] holding key/value entries or an
//! [`InnerNode`] holding separator keys and one more child than it has keys.
//! Each node owns its children outright; there are no parent or sibling
//! pointers, so the engines carry the descent path themselves.
//!
//! # Separator convention
//! ```text
//!              [ k0 | k1 ]
//!             /     |     \
//!     keys < k0   k0 <= keys < k1   keys >= k1
//! ```
//!
//! Every primitive here leaves an inner node with `children == keys + 1`
//! once it returns.

use std::fmt;

use crate::common::{Error, Key, Result, Value};

/// A node in the tree: a leaf of entries or an inner node of separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(LeafNode),
    Inner(InnerNode),
}

/// Sorted key/value entries at the bottom of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    pub(super) keys: Vec<Key>,
    pub(super) values: Vec<Value>,
}

/// Separator keys and the children they divide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerNode {
    pub(super) keys: Vec<Key>,
    pub(super) children: Vec<Node>,
}

/// Check that keys are strictly ascending.
pub(super) fn check_sorted(keys: &[Key]) -> Result<()> {
    match keys.windows(2).find(|pair| pair[0] >= pair[1]) {
        Some(pair) => Err(Error::UnsortedKeys {
            previous: pair[0],
            next: pair[1],
        }),
        None => Ok(()),
    }
}

// ============================================================================
// Node
// ============================================================================

impl Node {
    /// An empty leaf, the root of a fresh tree.
    pub fn empty_leaf() -> Self {
        Node::Leaf(LeafNode::default())
    }

    /// Build a leaf from parallel key and value lists.
    ///
    /// # Errors
    /// - `Error::KeyValueCountMismatch` if the lists differ in length
    /// - `Error::UnsortedKeys` if keys are not strictly ascending
    ///
    /// # Example
    /// ```
    /// use bplustree::Node;
    ///
    /// let leaf = Node::leaf(vec![1, 2], vec!["a".into(), "b".into()]).unwrap();
    /// assert_eq!(leaf.keys(), &[1, 2]);
    ///
    /// assert!(Node::leaf(vec![1, 2], vec!["a".into()]).is_err());
    /// ```
    pub fn leaf(keys: Vec<Key>, values: Vec<Value>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::KeyValueCountMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        check_sorted(&keys)?;
        Ok(Node::Leaf(LeafNode { keys, values }))
    }

    /// Build an inner node from separator keys and children.
    ///
    /// # Errors
    /// - `Error::KeyChildCountMismatch` unless `children.len() == keys.len() + 1`
    /// - `Error::UnsortedKeys` if keys are not strictly ascending
    pub fn inner(keys: Vec<Key>, children: Vec<Node>) -> Result<Self> {
        if children.len() != keys.len() + 1 {
            return Err(Error::KeyChildCountMismatch {
                keys: keys.len(),
                children: children.len(),
            });
        }
        check_sorted(&keys)?;
        Ok(Node::Inner(InnerNode { keys, children }))
    }

    /// Keys stored in this node: data keys for a leaf, separators otherwise.
    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Inner(inner) => &inner.keys,
        }
    }

    /// Number of keys in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// True if this node holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Inner(_) => None,
        }
    }

    pub fn as_inner(&self) -> Option<&InnerNode> {
        match self {
            Node::Leaf(_) => None,
            Node::Inner(inner) => Some(inner),
        }
    }

    /// Children of an inner node; empty for a leaf.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Inner(inner) => &inner.children,
        }
    }

    /// Values of a leaf; empty for an inner node.
    pub fn values(&self) -> &[Value] {
        match self {
            Node::Leaf(leaf) => &leaf.values,
            Node::Inner(_) => &[],
        }
    }

    fn fmt_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        match self {
            Node::Leaf(leaf) => writeln!(f, "{}", leaf),
            Node::Inner(inner) => {
                writeln!(f, "{:?}", inner.keys)?;
                for child in &inner.children {
                    child.fmt_depth(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::empty_leaf()
    }
}

/// Renders one node per line, children indented under their parent.
///
/// ```text
/// [3, 5]
///   [1: a, 2: b]
///   [3: c, 4: d]
///   [5: e, 6: f]
/// ```
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_depth(f, 0)
    }
}

// ============================================================================
// LeafNode
// ============================================================================

impl LeafNode {
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of `key`, or where it would be inserted.
    #[inline]
    pub(super) fn search(&self, key: Key) -> std::result::Result<usize, usize> {
        self.keys.binary_search(&key)
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: Key) -> Option<&Value> {
        self.search(key).ok().map(|pos| &self.values[pos])
    }

    pub(super) fn insert_at(&mut self, pos: usize, key: Key, value: Value) {
        self.keys.insert(pos, key);
        self.values.insert(pos, value);
    }

    pub(super) fn remove_at(&mut self, pos: usize) -> (Key, Value) {
        (self.keys.remove(pos), self.values.remove(pos))
    }

    /// Drop and return the first entry.
    pub(super) fn pop_front(&mut self) -> (Key, Value) {
        self.remove_at(0)
    }

    /// Drop and return the last entry.
    pub(super) fn pop_back(&mut self) -> (Key, Value) {
        let last = self.keys.len() - 1;
        self.remove_at(last)
    }

    /// Add an entry greater than every stored key.
    pub(super) fn push_back(&mut self, key: Key, value: Value) {
        debug_assert!(self.keys.last().map_or(true, |last| *last < key));
        self.keys.push(key);
        self.values.push(value);
    }

    /// Add an entry smaller than every stored key.
    pub(super) fn push_front(&mut self, key: Key, value: Value) {
        debug_assert!(self.keys.first().map_or(true, |first| key < *first));
        self.insert_at(0, key, value);
    }

    /// Append every entry of the right sibling `other`.
    pub(super) fn merge(&mut self, other: LeafNode) {
        self.keys.extend(other.keys);
        self.values.extend(other.values);
    }

    /// Move the upper part of the entries into a new right sibling.
    ///
    /// The lower `len / 2` entries stay, so an overflow of `C + 1` entries
    /// leaves `C / 2` here and `C / 2 + 1` on the right.
    pub(super) fn split(&mut self) -> LeafNode {
        let mid = self.keys.len() / 2;
        LeafNode {
            keys: self.keys.split_off(mid),
            values: self.values.split_off(mid),
        }
    }
}

impl fmt::Display for LeafNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (key, value)) in self.keys.iter().zip(&self.values).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("]")
    }
}

// ============================================================================
// InnerNode
// ============================================================================

impl InnerNode {
    /// New root over a node and the right sibling split off from it.
    pub(super) fn promote(left: Node, separator: Key, right: Node) -> Self {
        InnerNode {
            keys: vec![separator],
            children: vec![left, right],
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the child whose range contains `key`.
    ///
    /// This is the first `i` with `key < keys[i]`, or the last child when
    /// `key` is at least every separator.
    #[inline]
    pub fn child_index(&self, key: Key) -> usize {
        self.keys.partition_point(|separator| *separator <= key)
    }

    pub(super) fn child_mut(&mut self, index: usize) -> &mut Node {
        &mut self.children[index]
    }

    /// The separator `keys[left]` and the two children it divides.
    pub(super) fn separator_and_siblings_mut(
        &mut self,
        left: usize,
    ) -> (&mut Key, &mut Node, &mut Node) {
        let (head, tail) = self.children.split_at_mut(left + 1);
        (&mut self.keys[left], &mut head[left], &mut tail[0])
    }

    /// Insert `key` at `pos` with `child` directly to its right.
    pub(super) fn insert_at(&mut self, pos: usize, key: Key, child: Node) {
        self.keys.insert(pos, key);
        self.children.insert(pos + 1, child);
    }

    /// Remove `keys[pos]` together with the child to its right.
    pub(super) fn remove_at(&mut self, pos: usize) -> (Key, Node) {
        (self.keys.remove(pos), self.children.remove(pos + 1))
    }

    /// Drop and return the first child and first key.
    pub(super) fn pop_front(&mut self) -> (Node, Key) {
        (self.children.remove(0), self.keys.remove(0))
    }

    /// Drop and return the last key and last child.
    pub(super) fn pop_back(&mut self) -> (Key, Node) {
        let last = self.keys.len() - 1;
        self.remove_at(last)
    }

    pub(super) fn push_back(&mut self, key: Key, child: Node) {
        self.keys.push(key);
        self.children.push(child);
    }

    pub(super) fn push_front(&mut self, child: Node, key: Key) {
        self.keys.insert(0, key);
        self.children.insert(0, child);
    }

    /// Append the right sibling `other`, pulling `separator` down between them.
    pub(super) fn merge(&mut self, separator: Key, other: InnerNode) {
        self.keys.push(separator);
        self.keys.extend(other.keys);
        self.children.extend(other.children);
    }

    /// Move the upper keys into a new right sibling.
    ///
    /// The middle key moves up to the parent rather than into either half.
    pub(super) fn split(&mut self) -> (Key, InnerNode) {
        let mid = self.keys.len() / 2;
        let mut right_keys = self.keys.split_off(mid);
        let right_children = self.children.split_off(mid + 1);
        let separator = right_keys.remove(0);
        (
            separator,
            InnerNode {
                keys: right_keys,
                children: right_children,
            },
        )
    }

    /// The sole child of a keyless node.
    pub(super) fn into_only_child(mut self) -> Node {
        debug_assert!(self.keys.is_empty() && self.children.len() == 1);
        self.children.swap_remove(0)
    }
}
