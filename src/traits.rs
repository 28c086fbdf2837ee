//! Cache trait hierarchy.
//!
//! Layers the cache surface so consumers can ask for exactly the capability
//! they need:
//!
//! | Trait           | Extends         | Purpose                            |
//! |-----------------|-----------------|------------------------------------|
//! | `ReadOnlyCache` | -               | Queries with no side effects       |
//! | `CoreCache`     | `ReadOnlyCache` | Insert and access-with-promotion   |
//! | `LfuCacheTrait` | `CoreCache`     | Frequency-aware operations         |
//!
//! Unlike upsert-style caches, `insert` and `get` here are precondition
//! checked: `insert` refuses a present key and `get` refuses an absent one,
//! each without mutating anything. Callers that want the miss/fill pattern
//! branch on [`ReadOnlyCache::contains`] first.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, ReadOnlyCache};
//!
//! fn lookup_or_fill<C: CoreCache<u64, String>>(cache: &mut C, key: u64) -> bool {
//!     if cache.contains(&key) {
//!         let _ = cache.get(&key);
//!         true
//!     } else {
//!         let _ = cache.insert(key, key.to_string());
//!         false
//!     }
//! }
//!
//! let mut cache = LfuCache::new(16).unwrap();
//! assert!(!lookup_or_fill(&mut cache, 7)); // miss
//! assert!(lookup_or_fill(&mut cache, 7)); // hit
//! ```

use crate::error::{DuplicateKeyError, KeyNotFoundError};

/// Side-effect-free cache queries.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is present. Never promotes.
    fn contains(&self, key: &K) -> bool;

    /// Current number of live entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are present.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries; fixed at construction.
    fn capacity(&self) -> usize;
}

/// Core mutating operations.
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a fresh entry at frequency 1, evicting one entry first if the
    /// cache is full.
    ///
    /// Fails with [`DuplicateKeyError`] if `key` is already present; the
    /// cache is left unchanged in that case.
    fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKeyError>;

    /// Returns the value for `key`, promoting it one frequency level.
    ///
    /// Fails with [`KeyNotFoundError`] if `key` is absent; the cache is left
    /// unchanged in that case. This is the only operation that promotes.
    fn get(&mut self, key: &K) -> Result<&V, KeyNotFoundError>;
}

/// Frequency-aware operations specific to the LFU policy.
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Current frequency of `key` without promoting it.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// The entry that would be evicted next, without removing it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Removes and returns the entry that would be evicted next.
    fn pop_lfu(&mut self) -> Option<(K, V)>;
}
