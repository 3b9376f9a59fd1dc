//! Admissible-key domains for [`AvlTree`](super::AvlTree).
//!
//! A tree is parameterized by a zero-sized domain type that decides which
//! keys `insert` accepts. Rejected keys surface as
//! [`TreeError::InvalidKey`](super::TreeError::InvalidKey) before the tree is
//! touched.

/// Decides whether a key may be stored in a tree.
///
/// # Examples
///
/// ```rust
/// use arbor::collections::{AvlTree, KeyDomain, TreeError};
///
/// /// Only even keys.
/// struct Even;
///
/// impl KeyDomain<u32> for Even {
///     fn admits(key: &u32) -> bool {
///         key % 2 == 0
///     }
/// }
///
/// let mut tree: AvlTree<u32, Even> = AvlTree::new();
/// assert!(tree.insert(4).is_ok());
/// assert_eq!(tree.insert(5), Err(TreeError::InvalidKey(5)));
/// ```
pub trait KeyDomain<K: ?Sized> {
    /// Returns `true` if `key` belongs to the domain.
    fn admits(key: &K) -> bool;
}

/// Domain that admits every key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unrestricted;

impl<K: ?Sized> KeyDomain<K> for Unrestricted {
    #[inline]
    fn admits(_key: &K) -> bool {
        true
    }
}

/// Domain of natural numbers: integers strictly greater than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

macro_rules! impl_natural_domain {
    ($($integer:ty),* $(,)?) => {
        $(
            impl KeyDomain<$integer> for Natural {
                #[inline]
                fn admits(key: &$integer) -> bool {
                    *key > 0
                }
            }
        )*
    };
}

impl_natural_domain!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
