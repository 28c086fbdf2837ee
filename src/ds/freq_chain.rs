//! Frequency chain for O(1) LFU tracking.
//!
//! Tracks key access frequencies for LFU eviction with O(1) insert, touch,
//! remove, and pop-min. Keys are grouped into frequency buckets; the buckets
//! form a doubly-linked chain ordered by strictly increasing frequency, with
//! the chain head always at the minimum frequency present.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          FreqChain<K>                                │
//! │                                                                      │
//! │   index: FxHashMap<K, EntryId>       entries: Slab<Entry<K>>         │
//! │   ┌─────────┬─────────┐              ┌──────┬────────────────────┐   │
//! │   │ "a"     │  e0     │──────────────►  e0  │ bucket, prev/next  │   │
//! │   │ "b"     │  e1     │──────────────►  e1  │ bucket, prev/next  │   │
//! │   └─────────┴─────────┘              └──────┴────────────────────┘   │
//! │                                                                      │
//! │   buckets: Slab<Bucket>, chained by BucketId                         │
//! │                                                                      │
//! │   head ──► freq=1 ◄────► freq=3 ◄────► freq=7        (strictly      │
//! │            [e1]          [e0]          [...]          increasing)    │
//! │                                                                      │
//! │   Within a bucket: head=newest ◄──► tail=oldest (evicted first)      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buckets and entries live in slab storage owned by the chain and reference
//! each other through typed `BucketId`/`EntryId` handles, so there are no
//! raw pointers to keep consistent across splices, and a bucket link can
//! never be confused with an entry link. A bucket is never left empty: the
//! moment its last entry leaves, the bucket is unlinked and freed.
//!
//! Tie-breaking is FIFO within a bucket: `pop_min` removes the entry that has
//! been at the minimum frequency the longest.
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                |
//! |-------------|------|--------------------------------------|
//! | `insert`    | O(1) | New key starts at freq=1             |
//! | `touch`     | O(1) | Move key to the freq+1 bucket        |
//! | `remove`    | O(1) | Drop key from tracking               |
//! | `pop_min`   | O(1) | Evict oldest key at minimum freq     |
//! | `peek_min`  | O(1) | Eviction candidate without removal   |
//! | `frequency` | O(1) | Current frequency of a key           |
//! | `buckets`   | O(1) | Lazy walk of the chain, min-freq up  |
//!
//! ## Example
//!
//! ```
//! use lfukit::ds::FreqChain;
//!
//! let mut chain = FreqChain::new();
//! chain.insert("a");
//! chain.insert("b");
//! chain.touch(&"a"); // "a" now at freq=2
//!
//! assert_eq!(chain.frequency(&"a"), Some(2));
//! assert_eq!(chain.min_freq(), Some(1));
//! assert_eq!(chain.pop_min(), Some(("b", 1)));
//! ```

use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::mem;

/// Handle to a bucket in the chain's bucket slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BucketId(u32);

/// Handle to a key entry in the chain's entry slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryId(u32);

/// Slot storage with an intrusive free list: vacant slots chain to the next
/// vacant slot, so freeing and reusing are O(1) with no side allocations.
/// Handles are raw `u32` indexes; the chain wraps them in `BucketId`/`EntryId`
/// so the two slabs cannot be cross-indexed.
#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<u32> },
}

#[derive(Debug)]
struct Slab<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Slab<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    fn alloc(&mut self, value: T) -> u32 {
        let idx = match self.free_head {
            Some(idx) => {
                let slot = mem::replace(&mut self.slots[idx as usize], Slot::Occupied(value));
                self.free_head = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free-list head was occupied"),
                };
                idx
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                (self.slots.len() - 1) as u32
            },
        };
        self.len += 1;
        idx
    }

    fn free(&mut self, idx: u32) -> Option<T> {
        let next_free = self.free_head;
        let slot = self.slots.get_mut(idx as usize)?;
        match mem::replace(slot, Slot::Vacant { next_free }) {
            Slot::Occupied(value) => {
                self.free_head = Some(idx);
                self.len -= 1;
                Some(value)
            },
            vacant => {
                // Already free; put the original link back.
                *slot = vacant;
                None
            },
        }
    }

    fn get(&self, idx: u32) -> Option<&T> {
        match self.slots.get(idx as usize) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        match self.slots.get_mut(idx as usize) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[derive(Debug)]
struct Entry<K> {
    // Links within the owning bucket's entry list.
    prev: Option<EntryId>,
    next: Option<EntryId>,
    // Owning bucket; always valid while the entry is live.
    bucket: BucketId,
    key: K,
}

#[derive(Debug)]
struct Bucket {
    freq: u64,
    // Entry list: head = newest at this frequency, tail = oldest.
    head: Option<EntryId>,
    tail: Option<EntryId>,
    // Chain links: prev = lower frequency, next = higher frequency.
    prev: Option<BucketId>,
    next: Option<BucketId>,
}

/// O(1) LFU frequency tracker with FIFO tie-breaking within a frequency.
///
/// See the module docs for the layout. `FreqChain` tracks frequencies only;
/// values are the caller's concern (see [`LfuCache`](crate::policy::lfu::LfuCache)).
#[derive(Debug)]
pub struct FreqChain<K> {
    buckets: Slab<Bucket>,
    entries: Slab<Entry<K>>,
    index: FxHashMap<K, EntryId>,
    // Minimum-frequency bucket, None iff no entries.
    head: Option<BucketId>,
}

impl<K> FreqChain<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            buckets: Slab::new(),
            entries: Slab::new(),
            index: FxHashMap::default(),
            head: None,
        }
    }

    /// Creates an empty chain with reserved space for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: Slab::new(),
            entries: Slab::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`, if tracked.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let entry_id = *self.index.get(key)?;
        let entry = self.entries.get(entry_id.0)?;
        self.buckets.get(entry.bucket.0).map(|bucket| bucket.freq)
    }

    /// Returns the minimum frequency present, or `None` if empty.
    pub fn min_freq(&self) -> Option<u64> {
        self.head.map(|id| self.bucket(id).freq)
    }

    /// Peeks the eviction candidate `(key, freq)`: the oldest entry in the
    /// minimum-frequency bucket.
    ///
    /// ```
    /// use lfukit::ds::FreqChain;
    ///
    /// let mut chain = FreqChain::new();
    /// chain.insert("a");
    /// chain.insert("b");
    /// chain.touch(&"b");
    ///
    /// assert_eq!(chain.peek_min(), Some((&"a", 1)));
    /// assert_eq!(chain.len(), 2); // not removed
    /// ```
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let bucket = self.bucket(self.head?);
        let entry = self.entry(bucket.tail?);
        Some((&entry.key, bucket.freq))
    }

    /// Inserts a new key at frequency 1.
    ///
    /// Returns `false` if the key is already tracked (no change is made).
    ///
    /// ```
    /// use lfukit::ds::FreqChain;
    ///
    /// let mut chain = FreqChain::new();
    /// assert!(chain.insert("a"));
    /// assert!(!chain.insert("a"));
    /// assert_eq!(chain.frequency(&"a"), Some(1));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        // The freq=1 bucket, when it exists, is always the chain head.
        let bucket_id = match self.head {
            Some(id) if self.bucket(id).freq == 1 => id,
            _ => self.push_front_bucket(1),
        };

        let entry_id = EntryId(self.entries.alloc(Entry {
            prev: None,
            next: None,
            bucket: bucket_id,
            key: key.clone(),
        }));
        self.attach_entry(bucket_id, entry_id);
        self.index.insert(key, entry_id);
        true
    }

    /// Moves `key` to the next-higher frequency and returns the new value.
    ///
    /// Returns `None` if the key is not tracked. Frequency saturates at
    /// `u64::MAX`; a saturated key is refreshed to the newest position of its
    /// bucket without changing frequency.
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let entry_id = *self.index.get(key)?;
        let bucket_id = self.entry(entry_id).bucket;
        let freq = self.bucket(bucket_id).freq;

        if freq == u64::MAX {
            self.detach_entry(entry_id);
            self.attach_entry(bucket_id, entry_id);
            return Some(freq);
        }
        let target = freq + 1;

        // Reuse the successor bucket when it is exactly freq+1, otherwise
        // splice a fresh bucket directly after the current one.
        let target_id = match self.bucket(bucket_id).next {
            Some(next_id) if self.bucket(next_id).freq == target => next_id,
            _ => self.insert_bucket_after(target, bucket_id),
        };

        self.detach_entry(entry_id);
        if self.bucket(bucket_id).head.is_none() {
            self.unlink_bucket(bucket_id);
        }
        self.attach_entry(target_id, entry_id);
        Some(target)
    }

    /// Removes `key` from tracking and returns its previous frequency.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let entry_id = self.index.remove(key)?;
        let bucket_id = self.detach_entry(entry_id);
        let freq = self.bucket(bucket_id).freq;
        if self.bucket(bucket_id).head.is_none() {
            self.unlink_bucket(bucket_id);
        }
        self.entries.free(entry_id.0);
        Some(freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`.
    ///
    /// The candidate is the entry that has been at the minimum frequency the
    /// longest (FIFO tie-break).
    ///
    /// ```
    /// use lfukit::ds::FreqChain;
    ///
    /// let mut chain = FreqChain::new();
    /// chain.insert("a");
    /// chain.insert("b");
    /// chain.touch(&"b");
    ///
    /// assert_eq!(chain.pop_min(), Some(("a", 1)));
    /// assert_eq!(chain.pop_min(), Some(("b", 2)));
    /// assert_eq!(chain.pop_min(), None);
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let bucket_id = self.head?;
        let (tail, freq) = {
            let bucket = self.bucket(bucket_id);
            (bucket.tail, bucket.freq)
        };
        let entry_id = tail?;

        self.detach_entry(entry_id);
        if self.bucket(bucket_id).head.is_none() {
            self.unlink_bucket(bucket_id);
        }

        let entry = self.entries.free(entry_id.0)?;
        self.index.remove(&entry.key);
        Some((entry.key, freq))
    }

    /// Drops all entries and buckets.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.entries.clear();
        self.index.clear();
        self.head = None;
    }

    /// Walks the bucket chain from the minimum frequency upward.
    ///
    /// Read-only; each item exposes the bucket's frequency and its keys from
    /// newest to oldest. Useful for asserting on structure without touching
    /// cache state.
    ///
    /// ```
    /// use lfukit::ds::FreqChain;
    ///
    /// let mut chain = FreqChain::new();
    /// chain.insert("a");
    /// chain.insert("b");
    /// chain.touch(&"b");
    ///
    /// let dump: Vec<(u64, Vec<&&str>)> = chain
    ///     .buckets()
    ///     .map(|bucket| (bucket.freq(), bucket.keys().collect()))
    ///     .collect();
    /// assert_eq!(dump, vec![(1, vec![&"a"]), (2, vec![&"b"])]);
    /// ```
    pub fn buckets(&self) -> Buckets<'_, K> {
        Buckets {
            chain: self,
            current: self.head,
        }
    }

    #[doc(hidden)]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.entries.len(), self.index.len());

        if self.is_empty() {
            assert!(self.buckets.is_empty());
            assert!(self.head.is_none());
            return;
        }

        let mut seen = 0usize;
        let mut prev_bucket: Option<BucketId> = None;
        let mut prev_freq: Option<u64> = None;
        let mut current = self.head;
        while let Some(bucket_id) = current {
            let bucket = self.bucket(bucket_id);
            assert!(bucket.freq >= 1);
            if let Some(prev_freq) = prev_freq {
                assert!(bucket.freq > prev_freq, "frequencies must strictly increase");
            }
            assert_eq!(bucket.prev, prev_bucket);
            assert!(bucket.head.is_some(), "empty bucket left in chain");

            let mut entry_cursor = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(entry_id) = entry_cursor {
                let entry = self.entry(entry_id);
                assert_eq!(entry.bucket, bucket_id);
                assert_eq!(entry.prev, last);
                assert_eq!(self.index.get(&entry.key), Some(&entry_id));
                last = Some(entry_id);
                entry_cursor = entry.next;
                count += 1;
            }
            assert_eq!(bucket.tail, last);
            assert!(count > 0);
            seen += count;

            prev_freq = Some(bucket.freq);
            prev_bucket = Some(bucket_id);
            current = bucket.next;
        }
        assert_eq!(seen, self.entries.len());
    }

    #[inline]
    fn bucket(&self, id: BucketId) -> &Bucket {
        self.buckets.get(id.0).expect("bucket missing")
    }

    #[inline]
    fn bucket_mut(&mut self, id: BucketId) -> &mut Bucket {
        self.buckets.get_mut(id.0).expect("bucket missing")
    }

    #[inline]
    fn entry(&self, id: EntryId) -> &Entry<K> {
        self.entries.get(id.0).expect("entry missing")
    }

    #[inline]
    fn entry_mut(&mut self, id: EntryId) -> &mut Entry<K> {
        self.entries.get_mut(id.0).expect("entry missing")
    }

    fn push_front_bucket(&mut self, freq: u64) -> BucketId {
        let id = BucketId(self.buckets.alloc(Bucket {
            freq,
            head: None,
            tail: None,
            prev: None,
            next: self.head,
        }));
        if let Some(old_head) = self.head {
            self.bucket_mut(old_head).prev = Some(id);
        }
        self.head = Some(id);
        id
    }

    fn insert_bucket_after(&mut self, freq: u64, after: BucketId) -> BucketId {
        let next = self.bucket(after).next;
        let id = BucketId(self.buckets.alloc(Bucket {
            freq,
            head: None,
            tail: None,
            prev: Some(after),
            next,
        }));
        self.bucket_mut(after).next = Some(id);
        if let Some(next_id) = next {
            self.bucket_mut(next_id).prev = Some(id);
        }
        id
    }

    // Caller guarantees the bucket's entry list is already empty.
    fn unlink_bucket(&mut self, id: BucketId) {
        let (prev, next) = {
            let bucket = self.bucket(id);
            (bucket.prev, bucket.next)
        };
        match prev {
            Some(prev_id) => self.bucket_mut(prev_id).next = next,
            None => self.head = next,
        }
        if let Some(next_id) = next {
            self.bucket_mut(next_id).prev = prev;
        }
        self.buckets.free(id.0);
    }

    fn attach_entry(&mut self, bucket_id: BucketId, entry_id: EntryId) {
        let old_head = {
            let bucket = self.bucket_mut(bucket_id);
            let old_head = bucket.head;
            bucket.head = Some(entry_id);
            if old_head.is_none() {
                bucket.tail = Some(entry_id);
            }
            old_head
        };
        {
            let entry = self.entry_mut(entry_id);
            entry.prev = None;
            entry.next = old_head;
            entry.bucket = bucket_id;
        }
        if let Some(old_id) = old_head {
            self.entry_mut(old_id).prev = Some(entry_id);
        }
    }

    // Unlinks the entry from its bucket's list without freeing it.
    // Returns the owning bucket, which may now be empty.
    fn detach_entry(&mut self, entry_id: EntryId) -> BucketId {
        let (prev, next, bucket_id) = {
            let entry = self.entry(entry_id);
            (entry.prev, entry.next, entry.bucket)
        };
        match prev {
            Some(prev_id) => self.entry_mut(prev_id).next = next,
            None => self.bucket_mut(bucket_id).head = next,
        }
        match next {
            Some(next_id) => self.entry_mut(next_id).prev = prev,
            None => self.bucket_mut(bucket_id).tail = prev,
        }
        let entry = self.entry_mut(entry_id);
        entry.prev = None;
        entry.next = None;
        bucket_id
    }
}

impl<K> Default for FreqChain<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the bucket chain, minimum frequency first.
#[derive(Debug)]
pub struct Buckets<'a, K> {
    chain: &'a FreqChain<K>,
    current: Option<BucketId>,
}

impl<'a, K> Iterator for Buckets<'a, K> {
    type Item = BucketView<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.chain.buckets.get(self.current?.0)?;
        self.current = bucket.next;
        Some(BucketView {
            chain: self.chain,
            freq: bucket.freq,
            head: bucket.head,
        })
    }
}

/// Read-only view of one frequency bucket.
#[derive(Debug)]
pub struct BucketView<'a, K> {
    chain: &'a FreqChain<K>,
    freq: u64,
    head: Option<EntryId>,
}

impl<'a, K> BucketView<'a, K> {
    /// The bucket's frequency level.
    pub fn freq(&self) -> u64 {
        self.freq
    }

    /// The bucket's keys, newest first (the eviction candidate comes last).
    pub fn keys(&self) -> BucketKeys<'a, K> {
        BucketKeys {
            chain: self.chain,
            current: self.head,
        }
    }
}

/// Iterator over one bucket's keys, newest first.
#[derive(Debug)]
pub struct BucketKeys<'a, K> {
    chain: &'a FreqChain<K>,
    current: Option<EntryId>,
}

impl<'a, K> Iterator for BucketKeys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.chain.entries.get(self.current?.0)?;
        self.current = entry.next;
        Some(&entry.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(chain: &FreqChain<&'static str>) -> Vec<(u64, Vec<&'static str>)> {
        chain
            .buckets()
            .map(|bucket| (bucket.freq(), bucket.keys().copied().collect()))
            .collect()
    }

    mod slab {
        use super::*;

        #[test]
        fn freed_slots_are_reused_most_recent_first() {
            let mut slab: Slab<&str> = Slab::with_capacity(4);
            let a = slab.alloc("a");
            let b = slab.alloc("b");
            slab.free(a);
            slab.free(b);

            // Intrusive free list hands back the most recently freed slot.
            assert_eq!(slab.alloc("c"), b);
            assert_eq!(slab.alloc("d"), a);
            assert_eq!(slab.len(), 2);
            assert_eq!(slab.get(b), Some(&"c"));
        }

        #[test]
        fn double_free_is_rejected() {
            let mut slab = Slab::with_capacity(2);
            let idx = slab.alloc(9);
            assert_eq!(slab.free(idx), Some(9));
            assert_eq!(slab.free(idx), None);
            assert_eq!(slab.len(), 0);

            // The free list survives the rejected free.
            assert_eq!(slab.alloc(10), idx);
            assert_eq!(slab.get(idx), Some(&10));
        }

        #[test]
        fn stale_index_reads_nothing() {
            let mut slab = Slab::with_capacity(2);
            let idx = slab.alloc(1);
            slab.free(idx);
            assert_eq!(slab.get(idx), None);
            assert!(slab.get_mut(idx).is_none());
            assert!(slab.get(99).is_none());
        }

        #[test]
        fn get_mut_updates_in_place() {
            let mut slab = Slab::with_capacity(2);
            let idx = slab.alloc(1);
            *slab.get_mut(idx).unwrap() = 5;
            assert_eq!(slab.get(idx), Some(&5));
        }

        #[test]
        fn clear_resets_free_list() {
            let mut slab = Slab::with_capacity(2);
            let a = slab.alloc(1);
            slab.free(a);
            slab.alloc(2);

            slab.clear();
            assert!(slab.is_empty());
            assert_eq!(slab.alloc(3), 0);
        }
    }

    #[test]
    fn insert_starts_at_freq_one() {
        let mut chain = FreqChain::new();
        assert!(chain.insert("a"));
        assert!(chain.insert("b"));
        assert!(!chain.insert("a"));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.frequency(&"a"), Some(1));
        assert_eq!(chain.frequency(&"b"), Some(1));
        assert_eq!(chain.min_freq(), Some(1));
        chain.debug_validate_invariants();
    }

    #[test]
    fn touch_promotes_to_next_bucket() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");

        assert_eq!(chain.touch(&"a"), Some(2));
        assert_eq!(chain.touch(&"a"), Some(3));
        assert_eq!(chain.touch(&"missing"), None);

        assert_eq!(dump(&chain), vec![(1, vec!["b"]), (3, vec!["a"])]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn promotion_reuses_adjacent_bucket() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");
        chain.touch(&"a"); // a@2, b@1
        chain.touch(&"b"); // both @2, single bucket

        assert_eq!(dump(&chain), vec![(2, vec!["b", "a"])]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn empty_buckets_are_removed_immediately() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        for _ in 0..4 {
            chain.touch(&"a");
        }
        // Only the freq=5 bucket should remain.
        assert_eq!(dump(&chain), vec![(5, vec!["a"])]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn pop_min_is_fifo_within_a_bucket() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");
        chain.insert("c");
        chain.touch(&"c");

        assert_eq!(chain.pop_min(), Some(("a", 1)));
        assert_eq!(chain.pop_min(), Some(("b", 1)));
        assert_eq!(chain.pop_min(), Some(("c", 2)));
        assert_eq!(chain.pop_min(), None);
        assert!(chain.is_empty());
        chain.debug_validate_invariants();
    }

    #[test]
    fn touch_refreshes_fifo_position() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");
        chain.touch(&"a");
        chain.touch(&"b");

        // "a" reached freq=2 first, so it is the older of the two.
        assert_eq!(chain.pop_min(), Some(("a", 2)));
        assert_eq!(chain.pop_min(), Some(("b", 2)));
    }

    #[test]
    fn remove_drops_tracking_and_empty_bucket() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");
        chain.touch(&"b");

        assert_eq!(chain.remove(&"b"), Some(2));
        assert_eq!(chain.remove(&"b"), None);
        assert_eq!(dump(&chain), vec![(1, vec!["a"])]);
        chain.debug_validate_invariants();
    }

    #[test]
    fn peek_min_does_not_mutate() {
        let mut chain = FreqChain::new();
        assert_eq!(chain.peek_min(), None);

        chain.insert("a");
        chain.insert("b");
        assert_eq!(chain.peek_min(), Some((&"a", 1)));
        assert_eq!(chain.peek_min(), Some((&"a", 1)));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn reinsert_after_pop_starts_fresh() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.touch(&"a");
        chain.touch(&"a");
        assert_eq!(chain.pop_min(), Some(("a", 3)));

        assert!(chain.insert("a"));
        assert_eq!(chain.frequency(&"a"), Some(1));
    }

    #[test]
    fn min_freq_tracks_head_bucket() {
        let mut chain = FreqChain::new();
        assert_eq!(chain.min_freq(), None);

        chain.insert("a");
        chain.insert("b");
        assert_eq!(chain.min_freq(), Some(1));

        chain.touch(&"a");
        chain.touch(&"b");
        assert_eq!(chain.min_freq(), Some(2));
        chain.debug_validate_invariants();
    }

    #[test]
    fn repeated_touch_does_not_create_stale_buckets() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        for _ in 0..100 {
            chain.touch(&"a");
        }
        assert_eq!(chain.frequency(&"a"), Some(101));
        assert_eq!(chain.buckets().count(), 1);
        chain.debug_validate_invariants();
    }

    #[test]
    fn freed_storage_is_recycled_across_churn() {
        let mut chain = FreqChain::new();
        chain.insert(0u32);
        chain.touch(&0);
        // Each round frees one bucket and one entry and allocates new ones;
        // slab storage must not grow past the live working set.
        for i in 1..200u32 {
            chain.insert(i);
            chain.touch(&i);
            assert_eq!(chain.pop_min().map(|(key, _)| key), Some(i - 1));
            chain.debug_validate_invariants();
        }
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn clear_resets_everything() {
        let mut chain = FreqChain::new();
        chain.insert("a");
        chain.insert("b");
        chain.touch(&"a");

        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.min_freq(), None);
        assert!(!chain.contains(&"a"));
        chain.debug_validate_invariants();
    }

    #[test]
    fn interleaved_workload_keeps_invariants() {
        let mut chain = FreqChain::new();
        for i in 0..50u32 {
            chain.insert(i);
            chain.debug_validate_invariants();
        }
        for i in 0..50u32 {
            for _ in 0..(i % 7) {
                chain.touch(&i);
            }
            chain.debug_validate_invariants();
        }
        for i in (0..50u32).step_by(3) {
            chain.remove(&i);
            chain.debug_validate_invariants();
        }
        while chain.pop_min().is_some() {
            chain.debug_validate_invariants();
        }
        assert!(chain.is_empty());
    }
}
