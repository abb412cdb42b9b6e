//! bplustree - An in-memory B+ tree over integer keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           BPlusTree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐   │
//! │  │  Lookup engine  │ │ Insertion engine│ │ Deletion engine │   │
//! │  │   (tree.rs)     │ │   (insert.rs)   │ │   (delete.rs)   │   │
//! │  │ root → leaf     │ │ split upward,   │ │ borrow or merge │   │
//! │  │ descent         │ │ grow new root   │ │ upward, collapse│   │
//! │  └─────────────────┘ └─────────────────┘ └─────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Node model (node.rs)                     │   │
//! │  │  Leaf { keys, values }  |  Inner { keys, children }      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Common (common/)                         │   │
//! │  │          Capacity + Error + config constants             │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Capacity, Error, Key, Value, config)
//! - [`index`] - Index structures (B+ tree)
//!
//! # Quick Start
//! ```
//! use bplustree::BPlusTree;
//!
//! // Nodes hold at most 4 keys and, below the root, at least 2
//! let mut tree = BPlusTree::new(4).unwrap();
//!
//! for key in 0..10 {
//!     tree.insert(key, format!("value-{}", key));
//! }
//!
//! assert_eq!(tree.lookup(7), Some("value-7"));
//! assert_eq!(tree.delete(7), Some("value-7".to_string()));
//! assert_eq!(tree.lookup(7), None);
//! assert!(tree.validate().is_ok());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_CAPACITY, MIN_CAPACITY};
pub use common::{Capacity, Error, Key, Result, Value};

pub use index::btree::{BPlusTree, InnerNode, LeafNode, Node, TreeStats};
