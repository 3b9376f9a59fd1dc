//! Error types for the balanced tree.
//!
//! Only contract violations are errors. Looking up, deleting, or splitting on
//! a key that is not present is an ordinary outcome reported through `bool`
//! or `Option`, never through this type.

use std::fmt;

/// Represents errors that can occur when mutating an [`AvlTree`](super::AvlTree).
///
/// # Examples
///
/// ```rust
/// use arbor::collections::{AvlTree, Natural, TreeError};
///
/// let mut tree: AvlTree<i32, Natural> = AvlTree::new();
/// let error = tree.insert(-4).unwrap_err();
/// assert_eq!(error, TreeError::InvalidKey(-4));
/// assert_eq!(
///     format!("{error}"),
///     "invalid key -4: outside the tree's admissible key domain"
/// );
/// assert!(tree.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError<K> {
    /// The key is rejected by the tree's [`KeyDomain`](super::KeyDomain).
    ///
    /// The tree is left unmodified and the rejected key is handed back.
    InvalidKey(K),
    /// A checked merge was given a low tree whose maximum key is not strictly
    /// below the high tree's minimum key.
    OverlappingRanges,
}

impl<K> TreeError<K> {
    /// Returns the rejected key, if this is an [`TreeError::InvalidKey`].
    #[must_use]
    pub fn into_key(self) -> Option<K> {
        match self {
            Self::InvalidKey(key) => Some(key),
            Self::OverlappingRanges => None,
        }
    }
}

impl<K: fmt::Debug> fmt::Display for TreeError<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(
                formatter,
                "invalid key {key:?}: outside the tree's admissible key domain"
            ),
            Self::OverlappingRanges => write!(
                formatter,
                "cannot merge: low tree keys must all be below high tree keys"
            ),
        }
    }
}

impl<K: fmt::Debug> std::error::Error for TreeError<K> {}
