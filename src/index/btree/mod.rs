//! B+ tree index.
//!
//! # Components
//! - [`BPlusTree`] - The tree: construction, lookup, validation
//! - [`Node`] / [`LeafNode`] / [`InnerNode`] - Node variants and their primitives
//! - [`TreeStats`] - Structural operation counters
//!
//! Insertion and deletion live in their own modules as further
//! `impl BPlusTree` blocks, so each engine reads top to bottom.

mod delete;
mod insert;
mod node;
mod stats;
mod tree;

pub use node::{InnerNode, LeafNode, Node};
pub use stats::TreeStats;
pub use tree::BPlusTree;
