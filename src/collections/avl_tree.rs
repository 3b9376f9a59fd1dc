//! Height-balanced (AVL) ordered key set with logarithmic split and merge.
//!
//! This module provides [`AvlTree`], a mutable ordered container whose nodes
//! are exclusively owned by their parents.
//!
//! # Overview
//!
//! - O(log N) `search`
//! - O(log N) `insert`
//! - O(log N) `delete`
//! - O(log N) `split` and `merge`
//! - O(N) `inorder_traversal`, `count_nodes`, `validate`
//!
//! # Examples
//!
//! ```rust
//! use arbor::collections::AvlTree;
//!
//! let tree: AvlTree<i32> = [10, 20, 5, 6, 15, 30, 25].into_iter().collect();
//! assert_eq!(tree.inorder_traversal(), vec![5, 6, 10, 15, 20, 25, 30]);
//!
//! let (low, high) = tree.split(&15);
//! assert_eq!(low.inorder_traversal(), vec![5, 6, 10, 15]);
//! assert_eq!(high.inorder_traversal(), vec![20, 25, 30]);
//!
//! let merged = AvlTree::merge(low, high);
//! assert_eq!(merged.count_nodes(), 7);
//! assert!(merged.validate());
//! ```
//!
//! # Internal Structure
//!
//! Every node caches its height (leaf = 1, absent child = 0). The tree
//! maintains:
//! 1. Ordering: left subtree keys < node key < right subtree keys
//! 2. Balance: |height(left) - height(right)| <= 1 at every node
//! 3. Height: node.height = 1 + max(height(left), height(right))
//!
//! The cached height is only refreshed when a node's children change, so
//! [`AvlTree::validate`] reads it rather than recomputing it.
//!
//! `split` and `merge` are both built on `join`, which hangs a pivot node
//! between two trees of arbitrary heights by walking down the spine of the
//! taller one and rebalancing every ancestor on the way back up.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

use static_assertions::assert_impl_all;

use super::error::TreeError;
use super::key_domain::{KeyDomain, Unrestricted};

// =============================================================================
// Node Definition
// =============================================================================

type Link<K> = Option<Box<Node<K>>>;

/// Internal node structure for the AVL tree.
#[derive(Clone)]
struct Node<K> {
    key: K,
    height: usize,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    /// Creates a new leaf node.
    const fn leaf(key: K) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// height(left) - height(right), read from the cached fields.
    fn balance_factor(&self) -> isize {
        height(&self.left).cast_signed() - height(&self.right).cast_signed()
    }
}

/// Height of an optional subtree; absent subtrees have height 0.
fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations and Rebalancing
// =============================================================================

/// Right rotation around `node`; returns the new subtree root.
fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = node.left.take() else {
        return node;
    };
    node.left = new_root.right.take();
    node.update_height();
    new_root.right = Some(node);
    new_root.update_height();
    new_root
}

/// Left rotation around `node`; returns the new subtree root.
fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut new_root) = node.right.take() else {
        return node;
    };
    node.right = new_root.left.take();
    node.update_height();
    new_root.left = Some(node);
    new_root.update_height();
    new_root
}

/// Refreshes the height of `node` and restores its balance with at most one
/// double rotation. Both children must already be balanced.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        // LR case: straighten the left child into an LL shape first
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node
            .right
            .as_ref()
            .is_some_and(|right| right.balance_factor() > 0)
        {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

// =============================================================================
// Recursive Helpers
// =============================================================================

fn insert_into<K: Ord>(link: Link<K>, key: K) -> Box<Node<K>> {
    let Some(mut node) = link else {
        return Box::new(Node::leaf(key));
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_into(node.left.take(), key)),
        Ordering::Greater => node.right = Some(insert_into(node.right.take(), key)),
        Ordering::Equal => return node,
    }

    rebalance(node)
}

fn delete_from<K, Q>(link: Link<K>, key: &Q) -> Link<K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = link?;

    match key.cmp(node.key.borrow()) {
        Ordering::Less => node.left = delete_from(node.left.take(), key),
        Ordering::Greater => node.right = delete_from(node.right.take(), key),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => return right,
            (left, None) => return left,
            (left, Some(right)) => {
                // Two children: the in-order successor's key replaces ours and
                // the successor node itself is the one physically removed.
                let (rest, successor) = take_min(right);
                node.key = successor.key;
                node.left = left;
                node.right = rest;
            }
        },
    }

    Some(rebalance(node))
}

/// Detaches the minimum node of the subtree, returning the rebalanced
/// remainder and the detached node.
fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            node.height = 1;
            (rest, node)
        }
        Some(left) => {
            let (rest, minimum) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), minimum)
        }
    }
}

/// Detaches the maximum node of the subtree, returning the rebalanced
/// remainder and the detached node.
fn take_max<K>(mut node: Box<Node<K>>) -> (Link<K>, Box<Node<K>>) {
    match node.right.take() {
        None => {
            let rest = node.left.take();
            node.height = 1;
            (rest, node)
        }
        Some(right) => {
            let (rest, maximum) = take_max(right);
            node.right = rest;
            (Some(rebalance(node)), maximum)
        }
    }
}

/// Joins `left`, `pivot` and `right` into one balanced tree.
///
/// Requires every key in `left` < `pivot.key` < every key in `right`. The
/// pivot's own children are overwritten. The result is at most one level
/// taller than the taller input.
fn join<K>(left: Link<K>, mut pivot: Box<Node<K>>, right: Link<K>) -> Box<Node<K>> {
    let left_height = height(&left);
    let right_height = height(&right);

    match (left, right) {
        (Some(mut left), right) if left_height > right_height + 1 => {
            left.right = Some(join(left.right.take(), pivot, right));
            rebalance(left)
        }
        (left, Some(mut right)) if right_height > left_height + 1 => {
            right.left = Some(join(left, pivot, right.left.take()));
            rebalance(right)
        }
        (left, right) => {
            pivot.left = left;
            pivot.right = right;
            rebalance(pivot)
        }
    }
}

/// Splits the subtree into (keys <= `key`, keys > `key`), reusing every node.
fn split_at<K, Q>(link: Link<K>, key: &Q) -> (Link<K>, Link<K>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };
    let left = node.left.take();
    let right = node.right.take();

    if key.cmp(node.key.borrow()) == Ordering::Less {
        let (low, high) = split_at(left, key);
        (low, Some(join(high, node, right)))
    } else {
        let (low, high) = split_at(right, key);
        (Some(join(left, node, low)), high)
    }
}

fn contains_in<K, Q>(node: Option<&Node<K>>, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    node.is_some_and(|node| match key.cmp(node.key.borrow()) {
        Ordering::Less => contains_in(node.left.as_deref(), key),
        Ordering::Greater => contains_in(node.right.as_deref(), key),
        Ordering::Equal => true,
    })
}

fn count_in<K>(node: Option<&Node<K>>) -> usize {
    node.map_or(0, |node| {
        1 + count_in(node.left.as_deref()) + count_in(node.right.as_deref())
    })
}

fn balanced_in<K>(node: Option<&Node<K>>) -> bool {
    node.is_none_or(|node| {
        node.balance_factor().abs() <= 1
            && balanced_in(node.left.as_deref())
            && balanced_in(node.right.as_deref())
    })
}

// =============================================================================
// Violation
// =============================================================================

/// The invariant that [`AvlTree::check`] found broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The in-order key sequence is not strictly increasing.
    Ordering,
    /// Some node's balance factor lies outside [-1, 1].
    Balance,
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordering => write!(formatter, "in-order keys are not strictly increasing"),
            Self::Balance => write!(formatter, "a node's balance factor is outside [-1, 1]"),
        }
    }
}

impl std::error::Error for Violation {}

// =============================================================================
// AvlTree Definition
// =============================================================================

/// An ordered set of keys stored in a height-balanced binary search tree.
///
/// Keys must implement `Ord`. The type parameter `D` is the admissible-key
/// domain consulted by [`insert`](Self::insert); it defaults to
/// [`Unrestricted`]. Use [`Natural`](super::Natural) to accept only
/// positive integers.
///
/// Duplicate inserts are no-ops: the tree never stores the same key twice.
///
/// # Time Complexity
///
/// | Operation           | Complexity |
/// |---------------------|------------|
/// | `new`               | O(1)       |
/// | `search`            | O(log N)   |
/// | `insert`            | O(log N)   |
/// | `delete`            | O(log N)   |
/// | `split`             | O(log N)   |
/// | `merge`             | O(log N)   |
/// | `min`/`max`         | O(log N)   |
/// | `inorder_traversal` | O(N)       |
/// | `count_nodes`       | O(N)       |
/// | `validate`          | O(N)       |
///
/// # Examples
///
/// ```rust
/// use arbor::collections::{AvlTree, Natural};
///
/// let mut tree: AvlTree<u32, Natural> = AvlTree::new();
/// for key in [10, 5, 20, 15] {
///     tree.insert(key)?;
/// }
/// assert_eq!(tree.inorder_traversal(), vec![5, 10, 15, 20]);
/// assert!(tree.search(&15));
/// assert!(!tree.search(&100));
/// # Ok::<(), arbor::collections::TreeError<u32>>(())
/// ```
pub struct AvlTree<K, D = Unrestricted> {
    /// Root node of the tree
    root: Link<K>,
    domain: PhantomData<fn() -> D>,
}

impl<K, D> AvlTree<K, D> {
    /// Creates a new empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_root(None)
    }

    const fn from_root(root: Link<K>) -> Self {
        Self {
            root,
            domain: PhantomData,
        }
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the cached height of the root, or 0 for an empty tree.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Counts the nodes by walking the whole tree.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn count_nodes(&self) -> usize {
        count_in(self.root.as_deref())
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// The iterator borrows the tree and keeps an explicit stack, so
    /// traversal depth never touches the call stack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::AvlTree;
    ///
    /// let tree: AvlTree<i32> = [3, 1, 2].into_iter().collect();
    /// let keys: Vec<&i32> = tree.iter().collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> AvlTreeIterator<'_, K> {
        AvlTreeIterator::new(self.root.as_deref(), self.height())
    }

    /// Returns the smallest key, if any.
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.key)
    }

    /// Returns the largest key, if any.
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.key)
    }

    /// Concatenates two trees into one.
    ///
    /// Every key in `low` must be strictly less than every key in `high`.
    /// This is not checked: if it does not hold, the result still owns every
    /// node of both inputs but fails [`validate`](Self::validate). Use
    /// [`try_merge`](Self::try_merge) for a checked variant.
    ///
    /// If either tree is empty the other is returned unchanged. Otherwise the
    /// maximum node of `low` is detached and reused as the pivot joining the
    /// remainder of `low` with `high`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::AvlTree;
    ///
    /// let low: AvlTree<i32> = (1..=3).collect();
    /// let high: AvlTree<i32> = (4..=100).collect();
    ///
    /// let merged = AvlTree::merge(low, high);
    /// assert_eq!(merged.count_nodes(), 100);
    /// assert!(merged.validate());
    /// ```
    #[must_use]
    pub fn merge(low: Self, high: Self) -> Self {
        let root = match (low.root, high.root) {
            (None, high) => high,
            (low, None) => low,
            (Some(low), Some(high)) => {
                let (rest, pivot) = take_max(low);
                Some(join(rest, pivot, Some(high)))
            }
        };

        let merged = Self::from_root(root);
        tracing::debug!(height = merged.height(), "merged trees");
        merged
    }
}

impl<K: Ord, D> AvlTree<K, D> {
    /// Returns `true` if the tree contains `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        contains_in(self.root.as_deref(), key)
    }

    /// Removes `key` from the tree.
    ///
    /// Deleting a key that is not present (including from an empty tree)
    /// leaves the tree unchanged.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::AvlTree;
    ///
    /// let mut tree: AvlTree<i32> = [10, 20, 5].into_iter().collect();
    /// tree.delete(&20);
    /// tree.delete(&99);
    /// assert_eq!(tree.inorder_traversal(), vec![5, 10]);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root = delete_from(self.root.take(), key);
    }

    /// Splits the tree into `(low, high)` where `low` holds every key
    /// `<= key` and `high` every key `> key`.
    ///
    /// The tree is consumed and each of its nodes moves into exactly one of
    /// the results; no key is cloned. Both results are balanced.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::AvlTree;
    ///
    /// let tree: AvlTree<i32> = (1..=6).collect();
    /// let (low, high) = tree.split(&3);
    /// assert_eq!(low.inorder_traversal(), vec![1, 2, 3]);
    /// assert_eq!(high.inorder_traversal(), vec![4, 5, 6]);
    /// ```
    #[must_use]
    pub fn split<Q>(self, key: &Q) -> (Self, Self)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (low, high) = split_at(self.root, key);
        let (low, high) = (Self::from_root(low), Self::from_root(high));
        tracing::debug!(
            low_height = low.height(),
            high_height = high.height(),
            "split tree"
        );
        (low, high)
    }

    /// Concatenates two trees after checking that they do not overlap.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::OverlappingRanges`] when both trees are non-empty
    /// and the maximum key of `low` is not strictly less than the minimum key
    /// of `high`. Both inputs are dropped in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::{AvlTree, TreeError};
    ///
    /// let low: AvlTree<i32> = (1..=5).collect();
    /// let high: AvlTree<i32> = (5..=9).collect();
    /// assert_eq!(
    ///     AvlTree::try_merge(low, high).unwrap_err(),
    ///     TreeError::OverlappingRanges
    /// );
    /// ```
    pub fn try_merge(low: Self, high: Self) -> Result<Self, TreeError<K>> {
        if let (Some(low_max), Some(high_min)) = (low.max(), high.min())
            && low_max >= high_min
        {
            tracing::debug!("refused to merge overlapping trees");
            return Err(TreeError::OverlappingRanges);
        }
        Ok(Self::merge(low, high))
    }

    /// Checks the ordering and balance invariants, reporting the first one
    /// found broken.
    ///
    /// Balance is judged from each node's cached height; heights are not
    /// recomputed.
    ///
    /// # Errors
    ///
    /// Returns the [`Violation`] describing which invariant does not hold.
    pub fn check(&self) -> Result<(), Violation> {
        let mut previous: Option<&K> = None;
        for key in self {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(Violation::Ordering);
            }
            previous = Some(key);
        }

        if balanced_in(self.root.as_deref()) {
            Ok(())
        } else {
            Err(Violation::Balance)
        }
    }

    /// Returns `true` if the in-order keys are strictly increasing and every
    /// node's balance factor is within [-1, 1].
    ///
    /// An empty tree is valid.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    fn insert_admitted(&mut self, key: K) {
        self.root = Some(insert_into(self.root.take(), key));
    }
}

impl<K: Ord, D: KeyDomain<K>> AvlTree<K, D> {
    /// Inserts `key` into the tree.
    ///
    /// Inserting a key that is already present leaves the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidKey`] carrying `key` back when the domain
    /// `D` rejects it. The tree is not modified.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::{AvlTree, Natural, TreeError};
    ///
    /// let mut tree: AvlTree<i64, Natural> = AvlTree::new();
    /// tree.insert(7)?;
    /// tree.insert(7)?;
    /// assert_eq!(tree.count_nodes(), 1);
    /// assert_eq!(tree.insert(0), Err(TreeError::InvalidKey(0)));
    /// # Ok::<(), TreeError<i64>>(())
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), TreeError<K>> {
        if !D::admits(&key) {
            tracing::debug!("rejected key outside the admissible domain");
            return Err(TreeError::InvalidKey(key));
        }
        self.insert_admitted(key);
        Ok(())
    }
}

impl<K: Clone, D> AvlTree<K, D> {
    /// Returns the keys in ascending order.
    ///
    /// Non-destructive; each call walks the tree again.
    #[must_use]
    pub fn inorder_traversal(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

/// An iterator over the keys of an [`AvlTree`] in ascending order.
pub struct AvlTreeIterator<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> AvlTreeIterator<'a, K> {
    fn new(root: Option<&'a Node<K>>, height: usize) -> Self {
        let mut iterator = Self {
            stack: Vec::with_capacity(height),
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for AvlTreeIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}

impl<K> FusedIterator for AvlTreeIterator<'_, K> {}

/// An owning iterator over the keys of an [`AvlTree`] in ascending order.
pub struct AvlTreeIntoIterator<K> {
    stack: Vec<Box<Node<K>>>,
}

impl<K> AvlTreeIntoIterator<K> {
    fn push_left_spine(&mut self, mut link: Link<K>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K> Iterator for AvlTreeIntoIterator<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        Some(node.key)
    }
}

impl<K> FusedIterator for AvlTreeIntoIterator<K> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, D> Default for AvlTree<K, D> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, D> Clone for AvlTree<K, D> {
    fn clone(&self) -> Self {
        Self::from_root(self.root.clone())
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K, Unrestricted> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K, Unrestricted> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert_admitted(key);
        }
    }
}

impl<K, D> IntoIterator for AvlTree<K, D> {
    type Item = K;
    type IntoIter = AvlTreeIntoIterator<K>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iterator = AvlTreeIntoIterator {
            stack: Vec::with_capacity(self.height()),
        };
        iterator.push_left_spine(self.root);
        iterator
    }
}

impl<'a, K, D> IntoIterator for &'a AvlTree<K, D> {
    type Item = &'a K;
    type IntoIter = AvlTreeIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, D> PartialEq for AvlTree<K, D> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, D> Eq for AvlTree<K, D> {}

impl<K: fmt::Debug, D> fmt::Debug for AvlTree<K, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

assert_impl_all!(AvlTree<u64>: Send, Sync, Clone, Default, fmt::Debug);
assert_impl_all!(AvlTree<String, super::Natural>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
