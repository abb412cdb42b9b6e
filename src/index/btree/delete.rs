//! Deletion engine.
//!
//! Remove the entry from its leaf, then repair underfull nodes bottom-up.
//! At each level the underfull node tries, in order:
//!
//! 1. borrow the last entry of its left sibling,
//! 2. borrow the first entry of its right sibling,
//! 3. merge with a sibling: into the left one if it exists, otherwise
//!    absorbing the right one.
//!
//! Only a merge takes a key out of the parent, so only a merge can push
//! the problem one level up. A root left with no keys is replaced by its
//! only child.

use tracing::trace;

use crate::common::{Capacity, Key, Value};
use crate::index::btree::node::{InnerNode, Node};
use crate::index::btree::tree::{descend_mut, inner_at_mut};
use crate::index::btree::BPlusTree;

/// How an underfull child was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rebalance {
    BorrowedLeft,
    BorrowedRight,
    Merged,
}

impl BPlusTree {
    /// Remove `key`, returning its value, or `None` if it was absent.
    ///
    /// Deleting an absent key leaves the tree untouched.
    pub fn delete(&mut self, key: Key) -> Option<Value> {
        let mut path = Vec::new();
        let leaf = descend_mut(&mut self.root, key, &mut path);

        let pos = leaf.search(key).ok()?;
        let (_, value) = leaf.remove_at(pos);
        self.len -= 1;

        // a leaf root may shrink all the way to empty
        if !path.is_empty() && self.capacity.underflows(leaf.len()) {
            self.rebalance(path);
        }

        Some(value)
    }

    /// Repair the underfull node at the end of `path`, walking upward for
    /// as long as merges leave parents underfull.
    fn rebalance(&mut self, mut path: Vec<usize>) {
        let capacity = self.capacity;

        while let Some(child_index) = path.pop() {
            let parent = inner_at_mut(&mut self.root, &path);

            match parent.rebalance_child(child_index, capacity) {
                Rebalance::BorrowedLeft => {
                    self.stats.borrows_left += 1;
                    return;
                }
                Rebalance::BorrowedRight => {
                    self.stats.borrows_right += 1;
                    return;
                }
                Rebalance::Merged => self.stats.merges += 1,
            }

            if path.is_empty() || !capacity.underflows(parent.len()) {
                break;
            }
        }

        self.collapse_root();
    }

    /// Replace a keyless inner root with its only child.
    fn collapse_root(&mut self) {
        if !matches!(&self.root, Node::Inner(inner) if inner.is_empty()) {
            return;
        }
        if let Node::Inner(old_root) = std::mem::take(&mut self.root) {
            self.root = old_root.into_only_child();
            self.stats.root_collapses += 1;
            trace!(
                target: "bplustree::delete",
                height = self.height(),
                "collapsed root"
            );
        }
    }
}

impl InnerNode {
    /// Bring the underfull child at `index` back to minimum occupancy.
    fn rebalance_child(&mut self, index: usize, capacity: Capacity) -> Rebalance {
        let has_left = index > 0;
        let has_right = index + 1 < self.children.len();

        if has_left && capacity.can_lend(self.children[index - 1].len()) {
            self.borrow_from_left(index);
            Rebalance::BorrowedLeft
        } else if has_right && capacity.can_lend(self.children[index + 1].len()) {
            self.borrow_from_right(index);
            Rebalance::BorrowedRight
        } else {
            let left = if has_left { index - 1 } else { index };
            self.merge_children(left);
            Rebalance::Merged
        }
    }

    /// Move the last entry of child `index - 1` to the front of child `index`.
    fn borrow_from_left(&mut self, index: usize) {
        let (separator, left, node) = self.separator_and_siblings_mut(index - 1);
        match (left, node) {
            (Node::Leaf(left), Node::Leaf(node)) => {
                let (key, value) = left.pop_back();
                node.push_front(key, value);
                *separator = key;
            }
            // rotate right: the separator comes down, the left's last key goes up
            (Node::Inner(left), Node::Inner(node)) => {
                let (key, child) = left.pop_back();
                node.push_front(child, *separator);
                *separator = key;
            }
            _ => panic!("siblings at index {} are different node kinds", index),
        }
        trace!(
            target: "bplustree::delete",
            index,
            separator = *separator,
            "borrowed from left sibling"
        );
    }

    /// Move the first entry of child `index + 1` to the end of child `index`.
    fn borrow_from_right(&mut self, index: usize) {
        let (separator, node, right) = self.separator_and_siblings_mut(index);
        match (node, right) {
            (Node::Leaf(node), Node::Leaf(right)) => {
                let (key, value) = right.pop_front();
                node.push_back(key, value);
                *separator = right.keys[0];
            }
            // rotate left: the separator comes down, the right's first key goes up
            (Node::Inner(node), Node::Inner(right)) => {
                let (child, key) = right.pop_front();
                node.push_back(*separator, child);
                *separator = key;
            }
            _ => panic!("siblings at index {} are different node kinds", index),
        }
        trace!(
            target: "bplustree::delete",
            index,
            separator = *separator,
            "borrowed from right sibling"
        );
    }

    /// Fold child `left + 1` into child `left`, dropping their separator.
    fn merge_children(&mut self, left: usize) {
        let (separator, right) = self.remove_at(left);
        match (&mut self.children[left], right) {
            (Node::Leaf(node), Node::Leaf(right)) => node.merge(right),
            (Node::Inner(node), Node::Inner(right)) => node.merge(separator, right),
            _ => panic!("siblings at index {} are different node kinds", left),
        }
        trace!(
            target: "bplustree::delete",
            survivor = left,
            separator,
            "merged siblings"
        );
    }
}
