//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the least frequently accessed entry when capacity is reached.
//! Membership check, insert, and access-with-promotion are all amortized
//! O(1): the cache keeps a [`FreqChain`] of frequency buckets next to a
//! key-indexed value map, so no operation ever scans.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────┐
//!   │                      LfuCache<K, V>                        │
//!   │                                                            │
//!   │   values: FxHashMap<K, V>     (payloads live here)         │
//!   │                                                            │
//!   │   chain: FreqChain<K>         (frequency bookkeeping)      │
//!   │     head ──► freq=1 ◄──► freq=2 ◄──► freq=5                │
//!   │              [c, b]      [a]         [hot]                 │
//!   │               ▲                                            │
//!   │               └── eviction victim: oldest key here         │
//!   │                                                            │
//!   │   capacity: usize             (fixed at construction)      │
//!   └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! An entry starts at frequency 1 on `insert`; every successful `get`
//! promotes it by exactly one level. `insert` on a present key fails with
//! [`DuplicateKeyError`] and `get` on an absent key fails with
//! [`KeyNotFoundError`]; both fail before touching any state, so a failed
//! call leaves the cache exactly as it was. Eviction picks the oldest entry
//! in the minimum-frequency bucket (FIFO among ties) and discards the value
//! with no callback.
//!
//! ## Operations
//!
//! | Method          | Complexity | Description                             |
//! |-----------------|------------|-----------------------------------------|
//! | `new(capacity)` | O(1)       | Fails with `ConfigError` on capacity 0  |
//! | `contains(&k)`  | O(1)       | Membership, no promotion                |
//! | `insert(k, v)`  | O(1)       | Fresh entry at freq 1, may evict one    |
//! | `get(&k)`       | O(1)       | Value + promotion by one level          |
//! | `frequency(&k)` | O(1)       | Current frequency, no promotion         |
//! | `peek_lfu()`    | O(1)       | Next eviction victim, read-only         |
//! | `pop_lfu()`     | O(1)       | Remove and return the victim            |
//! | `buckets()`     | O(1)       | Lazy `(freq, keys)` chain walk          |
//! | `clear()`       | O(n)       | Drop all entries, keep capacity         |
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2).unwrap();
//! cache.insert(1, "one").unwrap();
//! cache.insert(2, "two").unwrap();
//!
//! assert_eq!(cache.get(&1), Ok(&"one")); // key 1 now at freq 2
//!
//! // Full: inserting evicts the least-frequently-used key, which is 2.
//! cache.insert(3, "three").unwrap();
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&1));
//! assert_eq!(cache.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! `LfuCache` is not thread-safe; it assumes a single logical owner. Wrap it
//! in a lock for shared access.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::freq_chain::{Buckets, FreqChain};
use crate::error::{ConfigError, DuplicateKeyError, KeyNotFoundError};
use crate::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};

/// LFU cache with O(1) operations over a frequency-bucket chain.
///
/// See the module docs for semantics and complexity.
#[derive(Debug)]
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    chain: FreqChain<K>,
    values: FxHashMap<K, V>,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Fails with [`ConfigError`] if `capacity` is zero: a zero-capacity LFU
    /// cache has no coherent eviction step, so it is rejected up front rather
    /// than defined away.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be > 0"));
        }
        Ok(Self {
            chain: FreqChain::with_capacity(capacity),
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        })
    }

    /// Returns `true` if `key` is present. No side effects.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.chain.contains(key)
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns `true` if no entries are present.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Maximum number of entries; fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts a fresh entry at frequency 1.
    ///
    /// If the cache is full, the eviction victim is removed first, so `len`
    /// never exceeds `capacity`. Fails with [`DuplicateKeyError`] if `key`
    /// is already present, leaving the cache unchanged.
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    /// use lfukit::error::DuplicateKeyError;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// assert_eq!(cache.insert("k", 1), Ok(()));
    /// assert_eq!(cache.insert("k", 2), Err(DuplicateKeyError));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKeyError> {
        if self.chain.contains(&key) {
            return Err(DuplicateKeyError);
        }

        if self.chain.len() == self.capacity {
            if let Some((victim, _)) = self.chain.pop_min() {
                self.values.remove(&victim);
            }
        }

        self.chain.insert(key.clone());
        self.values.insert(key, value);
        Ok(())
    }

    /// Returns the value for `key` and promotes it by one frequency level.
    ///
    /// Fails with [`KeyNotFoundError`] if `key` is absent, leaving the cache
    /// unchanged. This is the only operation that promotes.
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// cache.insert("k", 7).unwrap();
    ///
    /// assert_eq!(cache.get(&"k"), Ok(&7));
    /// assert_eq!(cache.frequency(&"k"), Some(2));
    /// assert!(cache.get(&"missing").is_err());
    /// ```
    pub fn get(&mut self, key: &K) -> Result<&V, KeyNotFoundError> {
        self.chain.touch(key).ok_or(KeyNotFoundError)?;
        Ok(self
            .values
            .get(key)
            .expect("value missing for tracked key"))
    }

    /// Current frequency of `key` without promoting it.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.chain.frequency(key)
    }

    /// The entry that would be evicted next, without removing it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (key, _) = self.chain.peek_min()?;
        let value = self.values.get(key)?;
        Some((key, value))
    }

    /// Removes and returns the entry that would be evicted next.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        let (key, _) = self.chain.pop_min()?;
        let value = self
            .values
            .remove(&key)
            .expect("value missing for tracked key");
        Some((key, value))
    }

    /// Drops all entries and buckets; capacity is unchanged.
    pub fn clear(&mut self) {
        self.chain.clear();
        self.values.clear();
    }

    /// Walks the frequency buckets from the minimum frequency upward.
    ///
    /// Read-only introspection of the internal chain: each item exposes the
    /// bucket's frequency and its keys. Intended for debugging and tests.
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4).unwrap();
    /// cache.insert("a", 1).unwrap();
    /// cache.insert("b", 2).unwrap();
    /// cache.get(&"b").unwrap();
    ///
    /// let freqs: Vec<u64> = cache.buckets().map(|b| b.freq()).collect();
    /// assert_eq!(freqs, vec![1, 2]);
    /// ```
    pub fn buckets(&self) -> Buckets<'_, K> {
        self.chain.buckets()
    }

    #[doc(hidden)]
    pub fn debug_validate_invariants(&self) {
        self.chain.debug_validate_invariants();
        assert!(self.chain.len() <= self.capacity);
        assert_eq!(self.chain.len(), self.values.len());
        for bucket in self.buckets() {
            for key in bucket.keys() {
                assert!(self.values.contains_key(key));
            }
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKeyError> {
        LfuCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Result<&V, KeyNotFoundError> {
        LfuCache::get(self, key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }
}
