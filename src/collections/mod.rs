//! In-memory collections.
//!
//! This module provides two independent containers:
//!
//! - [`AvlTree`]: ordered key set backed by a height-balanced binary search tree
//! - [`HashTable`]: unordered key/value map using separate chaining
//!
//! # Ownership
//!
//! Every tree node is exclusively owned by its parent (or by the tree, for
//! the root). `split` and `merge` move nodes between trees; no node is ever
//! copied or reachable from two roots.
//!
//! # Examples
//!
//! ## `AvlTree`
//!
//! ```rust
//! use arbor::collections::{AvlTree, Natural, TreeError};
//!
//! let mut tree: AvlTree<u64, Natural> = AvlTree::new();
//! for key in [10, 20, 5, 6, 15, 30, 25] {
//!     tree.insert(key)?;
//! }
//! assert_eq!(tree.inorder_traversal(), vec![5, 6, 10, 15, 20, 25, 30]);
//!
//! // Zero is not a natural number
//! assert_eq!(tree.insert(0), Err(TreeError::InvalidKey(0)));
//!
//! tree.delete(&20);
//! assert!(!tree.search(&20));
//! assert_eq!(tree.count_nodes(), 6);
//! assert!(tree.validate());
//! # Ok::<(), TreeError<u64>>(())
//! ```
//!
//! ## `HashTable`
//!
//! ```rust
//! use arbor::collections::HashTable;
//!
//! let mut table = HashTable::with_capacity(2);
//! table.put("a", 1);
//! table.put("b", 2); // load factor 1.0 > 0.75: the table grows
//! assert_eq!(table.bucket_count(), 4);
//! assert_eq!(table.get("a"), Some(&1));
//!
//! table.remove("b");
//! assert_eq!(table.get("b"), None);
//! assert_eq!(table.size(), 1);
//! ```

#[cfg(feature = "avl")]
mod avl_tree;
#[cfg(feature = "avl")]
mod error;
#[cfg(feature = "hash-table")]
mod hash_table;
#[cfg(feature = "avl")]
mod key_domain;

#[cfg(feature = "avl")]
pub use avl_tree::AvlTree;
#[cfg(feature = "avl")]
pub use avl_tree::AvlTreeIntoIterator;
#[cfg(feature = "avl")]
pub use avl_tree::AvlTreeIterator;
#[cfg(feature = "avl")]
pub use avl_tree::Violation;
#[cfg(feature = "avl")]
pub use error::TreeError;
#[cfg(feature = "hash-table")]
pub use hash_table::DefaultBuildHasher;
#[cfg(feature = "hash-table")]
pub use hash_table::HashTable;
#[cfg(feature = "hash-table")]
pub use hash_table::HashTableIterator;
#[cfg(feature = "avl")]
pub use key_domain::KeyDomain;
#[cfg(feature = "avl")]
pub use key_domain::Natural;
#[cfg(feature = "avl")]
pub use key_domain::Unrestricted;
