//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Node capacity
//! - Key and value types

mod capacity;
pub mod config;
pub mod error;

pub use capacity::Capacity;
pub use error::{Error, Result};

/// Key type stored in the tree.
pub type Key = i64;

/// Value type stored in the tree's leaves.
pub type Value = String;
