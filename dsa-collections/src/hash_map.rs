//! Separate-chaining hash map with load-factor driven rehash.
//!
//! Entries live in a vector of buckets; each bucket is a short vector of
//! `(K, V)` pairs scanned linearly. A key's bucket is
//! `hasher.hash_one(key) % bucket_count`.
//!
//! # Load Factor
//!
//! After every `put` that adds a new key, the map checks
//! `len / bucket_count` against its maximum load factor and doubles the
//! bucket count until the ratio is back at or below the limit. Overwrites
//! never change `len` and never rehash.
//!
//! # Configuration
//!
//! ```
//! use dsa_collections::{ChainedHashMap, HashMapBuilder};
//!
//! let mut map: ChainedHashMap<&str, u32> = HashMapBuilder::default()
//!     .buckets(32)
//!     .max_load_factor(0.5)
//!     .build()?;
//!
//! map.put("a", 1);
//! assert_eq!(map.get("a"), Some(&1));
//! assert_eq!(map.bucket_count(), 32);
//! # Ok::<(), dsa_collections::CollectionError>(())
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use tracing::debug;

use crate::CollectionError;

/// Bucket count used by [`ChainedHashMap::new`] and the default builder.
pub const DEFAULT_BUCKETS: usize = 10;

/// Load factor above which the map rehashes.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Smallest max load factor the builder accepts. Keeps the bucket count
/// within a hundred buckets per entry.
pub const MIN_MAX_LOAD_FACTOR: f64 = 0.01;

/// Deterministic default hasher: SipHash with fixed keys.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`ChainedHashMap`].
#[derive(Clone, Debug)]
pub struct HashMapBuilder<H = DefaultHashBuilder> {
    buckets: usize,
    max_load_factor: f64,
    hasher: H,
}

impl Default for HashMapBuilder {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher: DefaultHashBuilder::default(),
        }
    }
}

impl<H> HashMapBuilder<H> {
    /// Initial bucket count. Default: 10. Must be non-zero.
    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Load factor above which `put` rehashes. Default: 0.75.
    /// Must be finite and at least [`MIN_MAX_LOAD_FACTOR`].
    pub fn max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Replace the hash builder.
    pub fn hasher<H2>(self, hasher: H2) -> HashMapBuilder<H2> {
        HashMapBuilder {
            buckets: self.buckets,
            max_load_factor: self.max_load_factor,
            hasher,
        }
    }

    /// Build an empty map.
    pub fn build<K, V>(self) -> Result<ChainedHashMap<K, V, H>, CollectionError> {
        if self.buckets == 0 {
            return Err(CollectionError::InvalidConfig("bucket count must be > 0"));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor < MIN_MAX_LOAD_FACTOR {
            return Err(CollectionError::InvalidConfig(
                "max load factor must be finite and >= 0.01",
            ));
        }

        Ok(ChainedHashMap {
            buckets: empty_buckets(self.buckets),
            len: 0,
            max_load_factor: self.max_load_factor,
            hasher: self.hasher,
        })
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Vec<(K, V)>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, Vec::new);
    buckets
}

// =============================================================================
// ChainedHashMap
// =============================================================================

/// A hash map resolving collisions by chaining entries per bucket.
///
/// # Type Parameters
///
/// - `K`: Key type (`Hash + Eq`)
/// - `V`: Value type
/// - `H`: Hash builder (default [`DefaultHashBuilder`])
pub struct ChainedHashMap<K, V, H = DefaultHashBuilder> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    max_load_factor: f64,
    hasher: H,
}

impl<K, V> ChainedHashMap<K, V> {
    /// Creates an empty map with 10 buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates an empty map with `buckets` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    pub fn with_buckets(buckets: usize) -> Self {
        assert!(buckets > 0, "bucket count must be > 0");
        Self {
            buckets: empty_buckets(buckets),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher: DefaultHashBuilder::default(),
        }
    }

    /// Returns a builder with default settings.
    pub fn builder() -> HashMapBuilder {
        HashMapBuilder::default()
    }
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> ChainedHashMap<K, V, H> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / bucket_count`.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the load factor above which `put` rehashes.
    #[inline]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Removes every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates over entries in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: [].iter(),
            remaining: self.len,
        }
    }

    /// Iterates over keys in bucket order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over values in bucket order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Hash + Eq, V, H: BuildHasher> ChainedHashMap<K, V, H> {
    /// Inserts or overwrites `key`.
    ///
    /// Returns the previous value on overwrite; `len` is then unchanged.
    /// Adding a new key may trigger [`rehash`](Self::rehash).
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_of(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut entry.1, value));
        }

        bucket.push((key, value));
        self.len += 1;

        while self.load_factor() > self.max_load_factor {
            self.rehash();
        }
        None
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = &self.buckets[self.bucket_of(key)];
        bucket
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value. No-op if absent.
    ///
    /// The remaining entries of the bucket keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_of(key);
        let bucket = &mut self.buckets[index];
        let pos = bucket.iter().position(|(k, _)| k.borrow() == key)?;

        self.len -= 1;
        Some(bucket.remove(pos).1)
    }

    /// Doubles the bucket count and redistributes every entry.
    ///
    /// O(n). Entries are moved, never cloned.
    pub fn rehash(&mut self) {
        let old_count = self.buckets.len();
        let new_count = old_count.saturating_mul(2);
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_count));

        for (key, value) in old.into_iter().flatten() {
            let index = self.bucket_of(&key);
            self.buckets[index].push((key, value));
        }

        debug!(
            old_buckets = old_count,
            new_buckets = new_count,
            entries = self.len,
            "rehashed"
        );
    }

    #[inline]
    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }
}

impl<K: Clone, V: Clone, H: Clone> Clone for ChainedHashMap<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            max_load_factor: self.max_load_factor,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for ChainedHashMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V, H: BuildHasher> Extend<(K, V)> for ChainedHashMap<K, V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ChainedHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Vec<(K, V)>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
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

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H> IntoIterator for &'a ChainedHashMap<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn new_has_default_buckets() {
        let map: ChainedHashMap<u64, u64> = ChainedHashMap::new();
        assert_eq!(map.bucket_count(), DEFAULT_BUCKETS);
        assert_eq!(map.max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
        assert!(map.is_empty());
    }

    #[test]
    #[should_panic(expected = "bucket count must be > 0")]
    fn with_zero_buckets_panics() {
        let _map: ChainedHashMap<u64, u64> = ChainedHashMap::with_buckets(0);
    }

    #[test]
    fn builder_rejects_zero_buckets() {
        let result: Result<ChainedHashMap<u64, u64>, _> =
            ChainedHashMap::<u64, u64>::builder().buckets(0).build();
        assert!(matches!(result, Err(CollectionError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_bad_load_factor() {
        for bad in [0.0, -1.0, 1e-15, 0.009, f64::NAN, f64::INFINITY] {
            let result: Result<ChainedHashMap<u64, u64>, _> =
                HashMapBuilder::default().max_load_factor(bad).build();
            assert!(matches!(result, Err(CollectionError::InvalidConfig(_))));
        }
    }

    #[test]
    fn smallest_load_factor_stays_bounded() {
        let mut map = HashMapBuilder::default()
            .buckets(1)
            .max_load_factor(MIN_MAX_LOAD_FACTOR)
            .build()
            .unwrap();

        map.put(1u64, ());
        // 1/64 still exceeds 0.01; 1/128 does not
        assert_eq!(map.bucket_count(), 128);

        for i in 2..=10u64 {
            map.put(i, ());
        }
        assert!(map.load_factor() <= MIN_MAX_LOAD_FACTOR);
        assert!(map.bucket_count() <= 2048);
    }

    #[test]
    fn builder_custom_hasher() {
        use std::collections::hash_map::RandomState;

        let mut map: ChainedHashMap<&str, u32, RandomState> = HashMapBuilder::default()
            .buckets(3)
            .hasher(RandomState::new())
            .build()
            .unwrap();

        map.put("x", 1);
        map.put("y", 2);
        assert_eq!(map.get("x"), Some(&1));
        assert_eq!(map.get("y"), Some(&2));
    }

    // =========================================================================
    // Put / get / remove
    // =========================================================================

    #[test]
    fn put_then_get() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.put("one", 1), None);
        assert_eq!(map.put("two", 2), None);

        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.get("two"), Some(&2));
        assert_eq!(map.get("three"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn overwrite_keeps_len() {
        let mut map = ChainedHashMap::new();
        map.put("k", 1);
        assert_eq!(map.put("k", 2), Some(1));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&2));
    }

    #[test]
    fn get_mut_updates() {
        let mut map = ChainedHashMap::new();
        map.put(String::from("count"), 0);
        *map.get_mut("count").unwrap() += 5;
        assert_eq!(map.get("count"), Some(&5));
    }

    #[test]
    fn remove_then_get() {
        let mut map = ChainedHashMap::new();
        map.put(1u64, "a");
        map.put(2, "b");

        assert_eq!(map.remove(&1), Some("a"));
        assert_eq!(map.get(&1), None);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));
        assert_eq!(map.len(), 1);

        // Absent key is a no-op
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn colliding_keys_share_a_bucket() {
        let mut map = HashMapBuilder::default()
            .buckets(1)
            .max_load_factor(100.0)
            .build()
            .unwrap();
        for i in 0..20u64 {
            map.put(i, i * 10);
        }

        assert_eq!(map.bucket_count(), 1);
        for i in 0..20u64 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }

        map.remove(&7);
        let keys: Vec<_> = map.keys().copied().collect();
        let expected: Vec<_> = (0..20u64).filter(|&k| k != 7).collect();
        assert_eq!(keys, expected);
    }

    // =========================================================================
    // Rehash
    // =========================================================================

    #[test]
    fn rehash_doubles_on_threshold() {
        let mut map = ChainedHashMap::new();
        for i in 0..7u64 {
            map.put(i, ());
        }
        // 7 / 10 = 0.7, still within limit
        assert_eq!(map.bucket_count(), 10);

        map.put(7, ());
        // 8 / 10 = 0.8 triggered one doubling
        assert_eq!(map.bucket_count(), 20);
        assert!(map.load_factor() <= 0.75);

        for i in 0..8u64 {
            assert!(map.contains_key(&i));
        }
    }

    #[test]
    fn load_factor_bounded_after_every_put() {
        let mut map = ChainedHashMap::new();
        for i in 0..10_000u64 {
            map.put(i, i);
            assert!(map.load_factor() <= map.max_load_factor());
        }
        assert_eq!(map.len(), 10_000);
        for i in (0..10_000u64).step_by(97) {
            assert_eq!(map.get(&i), Some(&i));
        }
    }

    #[test]
    fn overwrite_never_rehashes() {
        let mut map = ChainedHashMap::new();
        for i in 0..7u64 {
            map.put(i, 0);
        }
        for round in 1..50 {
            map.put(3, round);
        }
        assert_eq!(map.bucket_count(), 10);
    }

    #[test]
    fn explicit_rehash_keeps_entries() {
        let mut map: ChainedHashMap<u64, u64> = (0..5).map(|i| (i, i + 100)).collect();
        map.rehash();

        assert_eq!(map.bucket_count(), 20);
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&(i + 100)));
        }
    }

    #[test]
    fn rehash_loops_for_small_load_factor() {
        let mut map = HashMapBuilder::default()
            .buckets(1)
            .max_load_factor(0.1)
            .build()
            .unwrap();

        map.put(1u64, ());
        // 1/1, 1/2, 1/4, 1/8 all exceed 0.1; 1/16 does not
        assert_eq!(map.bucket_count(), 16);
    }

    // =========================================================================
    // Iteration and ownership
    // =========================================================================

    #[test]
    fn iter_visits_every_entry_once() {
        let map: ChainedHashMap<u64, u64> = (0..100).map(|i| (i, i * 2)).collect();

        let iter = map.iter();
        assert_eq!(iter.len(), 100);

        let mut seen: Vec<_> = iter.map(|(k, v)| (*k, *v)).collect();
        seen.sort_unstable();
        let expected: Vec<_> = (0..100).map(|i| (i, i * 2)).collect();
        assert_eq!(seen, expected);

        let total: u64 = map.values().sum();
        assert_eq!(total, (0..100).map(|i| i * 2).sum());
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut map: ChainedHashMap<u64, u64> = (0..50).map(|i| (i, i)).collect();
        let buckets = map.bucket_count();

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.bucket_count(), buckets);
        assert_eq!(map.iter().count(), 0);
        assert_eq!(map.get(&1), None);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = ChainedHashMap::new();
        original.put("a", 1);

        let mut copy = original.clone();
        copy.put("a", 2);
        copy.put("b", 3);

        assert_eq!(original.get("a"), Some(&1));
        assert_eq!(original.get("b"), None);
        assert_eq!(copy.get("a"), Some(&2));
    }

    #[test]
    fn debug_lists_entries() {
        let mut map = ChainedHashMap::new();
        map.put(1u64, "x");
        assert_eq!(format!("{map:?}"), r#"{1: "x"}"#);
    }
}
