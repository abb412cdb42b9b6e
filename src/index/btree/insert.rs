//! Insertion engine.
//!
//! Insert into the target leaf, then split upward while nodes overflow:
//!
//! ```text
//! capacity 4, insert 7:
//!
//!        [3]                          [3, 5]
//!       /   \            =>          /   |   \
//!   [1,2]  [3,4,5,6,7]          [1,2] [3,4] [5,6,7]
//! ```
//!
//! A split that reaches the root grows a new root above it.

use tracing::trace;

use crate::common::{Key, Value};
use crate::index::btree::node::{InnerNode, Node};
use crate::index::btree::tree::{descend_mut, inner_at_mut};
use crate::index::btree::BPlusTree;

impl BPlusTree {
    /// Insert `value` under `key`.
    ///
    /// If `key` is already present its value is overwritten in place and
    /// the tree's shape does not change.
    pub fn insert(&mut self, key: Key, value: Value) {
        let mut path = Vec::new();
        let leaf = descend_mut(&mut self.root, key, &mut path);

        let pos = match leaf.search(key) {
            Ok(pos) => {
                trace!(target: "bplustree::insert", key, "overwrote existing value");
                leaf.values[pos] = value;
                return;
            }
            Err(pos) => pos,
        };
        leaf.insert_at(pos, key, value);
        self.len += 1;

        if !self.capacity.overflows(leaf.len()) {
            return;
        }

        let right = leaf.split();
        let mut separator = right.keys[0];
        let mut sibling = Node::Leaf(right);
        self.stats.leaf_splits += 1;
        trace!(
            target: "bplustree::insert",
            separator,
            depth = path.len(),
            "split leaf"
        );

        // Hand the new sibling to each ancestor in turn, bottom-up.
        while let Some(child_index) = path.pop() {
            let parent = inner_at_mut(&mut self.root, &path);
            parent.insert_at(child_index, separator, sibling);

            if !self.capacity.overflows(parent.len()) {
                return;
            }

            let (pulled_up, right) = parent.split();
            separator = pulled_up;
            sibling = Node::Inner(right);
            self.stats.inner_splits += 1;
            trace!(
                target: "bplustree::insert",
                separator,
                depth = path.len(),
                "split inner node"
            );
        }

        self.promote_root(separator, sibling);
    }

    /// Grow the tree by one level after the old root split.
    fn promote_root(&mut self, separator: Key, right: Node) {
        let left = std::mem::take(&mut self.root);
        self.root = Node::Inner(InnerNode::promote(left, separator, right));
        self.stats.root_promotions += 1;
        trace!(
            target: "bplustree::insert",
            separator,
            height = self.height(),
            "promoted new root"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Key;
    use crate::index::btree::{BPlusTree, Node};

    fn leaf(keys: &[Key], values: &[&str]) -> Node {
        Node::leaf(keys.to_vec(), values.iter().map(|v| v.to_string()).collect()).unwrap()
    }

    fn inner(keys: &[Key], children: Vec<Node>) -> Node {
        Node::inner(keys.to_vec(), children).unwrap()
    }

    fn tree(root: Node) -> BPlusTree {
        BPlusTree::with_root(root, 4).unwrap()
    }

    #[test]
    fn test_insert_into_leaf_without_split() {
        let mut tree = tree(leaf(&[1, 3], &["a", "c"]));

        tree.insert(2, "b".to_string());

        assert_eq!(tree.root(), &leaf(&[1, 2, 3], &["a", "b", "c"]));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.stats().splits(), 0);
    }

    #[test]
    fn test_insert_fills_leaf_to_capacity() {
        let mut tree = tree(leaf(&[1, 2, 3], &["a", "b", "c"]));

        tree.insert(4, "d".to_string());

        assert!(tree.root().is_leaf());
        assert_eq!(tree.root().len(), 4);
    }

    #[test]
    fn test_split_leaf_under_inner_node() {
        let mut tree = tree(inner(
            &[3],
            vec![
                leaf(&[1, 2], &["a", "b"]),
                leaf(&[3, 4, 5, 6], &["c", "d", "e", "f"]),
            ],
        ));

        tree.insert(7, "g".to_string());

        let expected = inner(
            &[3, 5],
            vec![
                leaf(&[1, 2], &["a", "b"]),
                leaf(&[3, 4], &["c", "d"]),
                leaf(&[5, 6, 7], &["e", "f", "g"]),
            ],
        );
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.stats().leaf_splits, 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_split_leaf_root_promotes() {
        let mut tree = tree(leaf(&[1, 2, 3, 4], &["a", "b", "c", "d"]));

        tree.insert(5, "e".to_string());

        let expected = inner(
            &[3],
            vec![
                leaf(&[1, 2], &["a", "b"]),
                leaf(&[3, 4, 5], &["c", "d", "e"]),
            ],
        );
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.stats().root_promotions, 1);
    }

    #[test]
    fn test_split_leftmost_leaf() {
        let mut tree = tree(inner(
            &[5],
            vec![
                leaf(&[1, 2, 3, 4], &["a", "b", "c", "d"]),
                leaf(&[5, 6], &["e", "f"]),
            ],
        ));

        tree.insert(0, "z".to_string());

        let expected = inner(
            &[2, 5],
            vec![
                leaf(&[0, 1], &["z", "a"]),
                leaf(&[2, 3, 4], &["b", "c", "d"]),
                leaf(&[5, 6], &["e", "f"]),
            ],
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_split_cascades_through_inner_root() {
        let mut tree = tree(inner(
            &[3, 5, 7, 9],
            vec![
                leaf(&[1, 2], &["a", "b"]),
                leaf(&[3, 4], &["c", "d"]),
                leaf(&[5, 6], &["e", "f"]),
                leaf(&[7, 8], &["g", "h"]),
                leaf(&[9, 10, 11, 12], &["i", "j", "k", "l"]),
            ],
        ));

        tree.insert(13, "m".to_string());

        // leaf splits at 11, inner root [3, 5, 7, 9, 11] splits around 7
        let expected = inner(
            &[7],
            vec![
                inner(
                    &[3, 5],
                    vec![
                        leaf(&[1, 2], &["a", "b"]),
                        leaf(&[3, 4], &["c", "d"]),
                        leaf(&[5, 6], &["e", "f"]),
                    ],
                ),
                inner(
                    &[9, 11],
                    vec![
                        leaf(&[7, 8], &["g", "h"]),
                        leaf(&[9, 10], &["i", "j"]),
                        leaf(&[11, 12, 13], &["k", "l", "m"]),
                    ],
                ),
            ],
        );
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.height(), 3);

        let stats = tree.stats();
        assert_eq!(stats.leaf_splits, 1);
        assert_eq!(stats.inner_splits, 1);
        assert_eq!(stats.root_promotions, 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_insert_duplicate_overwrites() {
        let mut tree = tree(leaf(&[1, 2], &["a", "b"]));

        tree.insert(2, "B".to_string());

        assert_eq!(tree.root(), &leaf(&[1, 2], &["a", "B"]));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.lookup(2), Some("B"));
    }

    #[test]
    fn test_insert_duplicate_into_full_leaf_does_not_split() {
        let mut tree = tree(leaf(&[1, 2, 3, 4], &["a", "b", "c", "d"]));

        tree.insert(4, "D".to_string());

        assert!(tree.root().is_leaf());
        assert_eq!(tree.stats().splits(), 0);
        assert_eq!(tree.lookup(4), Some("D"));
    }

    #[test]
    fn test_sequential_inserts_stay_valid() {
        let mut tree = BPlusTree::new(4).unwrap();
        for key in 0..200 {
            tree.insert(key, key.to_string());
            tree.validate().unwrap();
        }

        assert_eq!(tree.len(), 200);
        for key in 0..200 {
            assert_eq!(tree.lookup(key), Some(key.to_string().as_str()));
        }
    }

    #[test]
    fn test_reverse_inserts_stay_valid() {
        let mut tree = BPlusTree::new(2).unwrap();
        for key in (0..100).rev() {
            tree.insert(key, key.to_string());
            tree.validate().unwrap();
        }

        assert_eq!(tree.len(), 100);
        assert!(tree.height() > 1);
    }
}
