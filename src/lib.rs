//! # arbor
//!
//! In-memory containers built around a height-balanced (AVL) binary search
//! tree that supports logarithmic split and merge, plus a separately chained
//! hash table.
//!
//! ## Overview
//!
//! - **`AvlTree`**: ordered set of keys with insert, delete, search, ordered
//!   traversal, `split` (partition by pivot) and `merge` (concatenate two
//!   key-range-disjoint trees), and an explicit invariant validator.
//! - **`HashTable`**: unordered key/value map using separate chaining that
//!   doubles its bucket count once the load factor exceeds 3/4.
//!
//! The two containers share no code and can be enabled independently.
//!
//! ## Feature Flags
//!
//! - `avl`: the balanced tree and its error/domain types
//! - `hash-table`: the chained hash table
//! - `fxhash`: use `rustc-hash` as the table's default hasher
//! - `ahash`: use `ahash` as the table's default hasher
//! - `full`: enable all containers
//!
//! ## Example
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! let mut tree: AvlTree<u32> = (1..=6).collect();
//! let (low, high) = tree.split(&3);
//! assert_eq!(low.inorder_traversal(), vec![1, 2, 3]);
//! assert_eq!(high.inorder_traversal(), vec![4, 5, 6]);
//!
//! tree = AvlTree::merge(low, high);
//! assert!(tree.validate());
//!
//! let mut table = HashTable::new();
//! table.put("apple", 1);
//! assert_eq!(table.get("apple"), Some(&1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use arbor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collections::*;
}

pub mod collections;
