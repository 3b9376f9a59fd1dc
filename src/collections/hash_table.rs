//! Mutable hash table using separate chaining.
//!
//! This module provides [`HashTable`], an unordered key/value map backed by
//! an array of buckets. Each bucket is a short sequence of entries whose keys
//! share a slot.
//!
//! # Overview
//!
//! - O(1) average `put`, `get`, `remove`
//! - O(1) `size`
//! - The bucket count doubles, and every entry is redistributed, whenever an
//!   insertion pushes the load factor (size / bucket count) above 3/4
//!
//! # Examples
//!
//! ```rust
//! use arbor::collections::HashTable;
//!
//! let mut table = HashTable::new();
//! table.put("apple".to_string(), 1);
//! table.put("banana".to_string(), 2);
//!
//! assert_eq!(table.get("apple"), Some(&1));
//! assert_eq!(table.get("kiwi"), None);
//!
//! // Putting an existing key overwrites its value
//! table.put("banana".to_string(), 42);
//! assert_eq!(table.get("banana"), Some(&42));
//! assert_eq!(table.size(), 2);
//! ```
//!
//! # Hashing
//!
//! The hasher is a [`BuildHasher`] type parameter. Without hasher features it
//! defaults to [`std::hash::RandomState`]; the `fxhash` and `ahash` features
//! swap the default for `rustc_hash::FxBuildHasher` or `ahash::RandomState`.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};

use smallvec::SmallVec;
use static_assertions::assert_impl_all;

// =============================================================================
// Constants
// =============================================================================

/// Bucket count used by [`HashTable::new`].
const DEFAULT_BUCKET_COUNT: usize = 8;

/// Growth triggers once `size / buckets > LOAD_NUMERATOR / LOAD_DENOMINATOR`.
const LOAD_NUMERATOR: usize = 3;
const LOAD_DENOMINATOR: usize = 4;

// =============================================================================
// Hasher Selection
// =============================================================================

/// The hasher builder used when none is specified.
#[cfg(feature = "fxhash")]
pub type DefaultBuildHasher = rustc_hash::FxBuildHasher;

/// The hasher builder used when none is specified.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultBuildHasher = ahash::RandomState;

/// The hasher builder used when none is specified.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultBuildHasher = std::hash::RandomState;

// =============================================================================
// HashTable Definition
// =============================================================================

/// Most chains hold zero or one entry at the load factors the table allows.
type Bucket<K, V> = SmallVec<[(K, V); 1]>;

/// An unordered key/value map using separate chaining.
///
/// Keys must implement `Hash` and `Eq`. A missing key is an ordinary
/// outcome: lookups return `None` and removals of absent keys do nothing.
///
/// # Time Complexity
///
/// | Operation     | Complexity            |
/// |---------------|-----------------------|
/// | `put`         | O(1) average, O(N) on growth |
/// | `get`         | O(1) average          |
/// | `remove`      | O(1) average          |
/// | `size`        | O(1)                  |
///
/// # Examples
///
/// ```rust
/// use arbor::collections::HashTable;
///
/// let mut table = HashTable::with_capacity(2);
/// table.put("a", 1);
/// table.put("b", 2);
/// assert_eq!(table.bucket_count(), 4);
///
/// table.put("c", 3);
/// table.remove("b");
/// assert_eq!(table.size(), 2);
/// assert_eq!(table.get("b"), None);
/// assert_eq!(table.get("c"), Some(&3));
/// ```
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultBuildHasher> {
    buckets: Vec<Bucket<K, V>>,
    /// Number of live entries across all buckets
    size: usize,
    hasher: S,
}

impl<K, V> HashTable<K, V, DefaultBuildHasher> {
    /// Creates an empty table with 8 buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKET_COUNT)
    }

    /// Creates an empty table with `bucket_count` buckets.
    ///
    /// A bucket count of 0 is raised to 1.
    #[must_use]
    pub fn with_capacity(bucket_count: usize) -> Self {
        Self::with_capacity_and_hasher(bucket_count, DefaultBuildHasher::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table with 8 buckets that hashes keys with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_BUCKET_COUNT, hasher)
    }

    /// Creates an empty table with `bucket_count` buckets that hashes keys
    /// with `hasher`.
    ///
    /// A bucket count of 0 is raised to 1.
    #[must_use]
    pub fn with_capacity_and_hasher(bucket_count: usize, hasher: S) -> Self {
        Self {
            buckets: empty_buckets(bucket_count.max(1)),
            size: 0,
            hasher,
        }
    }

    /// Returns the number of live entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current number of buckets.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `size / bucket_count`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Removes every entry, keeping the current bucket count.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(SmallVec::clear);
        self.size = 0;
    }

    /// Returns an iterator over the entries in bucket order.
    ///
    /// The order is unspecified and changes when the table grows.
    #[must_use]
    pub fn iter(&self) -> HashTableIterator<'_, K, V> {
        HashTableIterator {
            buckets: self.buckets.iter(),
            current: <&[(K, V)]>::default().iter(),
            remaining: self.size,
        }
    }

    fn exceeds_load_factor(&self) -> bool {
        self.size * LOAD_DENOMINATOR > self.buckets.len() * LOAD_NUMERATOR
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Maps a key to its bucket: hash modulo bucket count.
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Associates `value` with `key`.
    ///
    /// If the key is already present its value is overwritten and the size is
    /// unchanged. Otherwise the entry is appended to its bucket, and the
    /// table grows if the load factor now exceeds 3/4.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.put("x", 10);
    /// table.put("x", 999);
    /// assert_eq!(table.get("x"), Some(&999));
    /// assert_eq!(table.size(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some((_, existing)) = bucket.iter_mut().find(|(candidate, _)| *candidate == key) {
            *existing = value;
            return;
        }

        bucket.push((key, value));
        self.size += 1;

        if self.exceeds_load_factor() {
            self.grow();
        }
    }

    /// Returns a reference to the value stored for `key`, or `None`.
    ///
    /// The key may be any borrowed form of the table's key type, but `Hash`
    /// and `Eq` on the borrowed form must match those for the key type.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|(candidate, _)| key.eq(candidate.borrow()))
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored for `key`, or `None`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(candidate, _)| key.eq(candidate.borrow()))
            .map(|(_, value)| value)
    }

    /// Returns `true` if the table holds an entry for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// Removing an absent key does nothing and returns `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket
            .iter()
            .position(|(candidate, _)| key.eq(candidate.borrow()))?;

        let (_, value) = bucket.swap_remove(position);
        self.size -= 1;
        Some(value)
    }

    /// Doubles the bucket count and redistributes every entry, visiting old
    /// buckets in order and each bucket's entries in order.
    fn grow(&mut self) {
        let new_bucket_count = self.buckets.len() * 2;
        let old_buckets = std::mem::replace(&mut self.buckets, empty_buckets(new_bucket_count));

        tracing::debug!(
            old_bucket_count = old_buckets.len(),
            new_bucket_count,
            size = self.size,
            "growing hash table"
        );

        // Keys are already distinct, so entries go straight into place and
        // the size is untouched.
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

fn empty_buckets<K, V>(bucket_count: usize) -> Vec<Bucket<K, V>> {
    std::iter::repeat_with(SmallVec::new)
        .take(bucket_count)
        .collect()
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`HashTable`].
pub struct HashTableIterator<'a, K, V> {
    buckets: std::slice::Iter<'a, Bucket<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for HashTableIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for HashTableIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for HashTableIterator<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    #[inline]
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashTable<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashTable<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = HashTableIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for HashTable<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|other_value| other_value == value))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for HashTable<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

assert_impl_all!(HashTable<String, i32>: Send, Sync, Clone, Default, fmt::Debug);

// =============================================================================
// Tests
// =============================================================================
