//! Size-budgeted LRU caching with automatic eviction.
//!
//! A [`SizedLruCache`] holds byte-string keys tagged with opaque 32-bit
//! values, each declaring a *consumption* weight against a fixed budget set
//! at construction. An insert that would overflow the budget evicts least
//! recently used cohorts until the new entry fits; if the cache empties and
//! the entry still cannot fit, the insert is rejected with
//! [`Error::DoesntFit`].
//!
//! The internal machinery is the bucket-row recency design of
//! [`LruTracker`](crate::LruTracker) — power-of-two bucket table, index
//! arena, per-row LRU list — plus budget accounting:
//!
//! ```text
//! put(k, v, weight):
//!     while budget_left < weight:
//!         evict tail row          (whole cohort, values to the sink)
//!         if nothing left: DoesntFit
//!     bind k, budget_left -= weight
//! ```
//!
//! The budget identity `Σ live consumption + cache_left == cache_size`
//! holds after every operation. Weights must lie in `1..u16::MAX`: zero is
//! the vacancy sentinel a free arena slot carries, and the all-ones weight
//! is reserved; both are rejected at the API boundary.
//!
//! # Examples
//!
//! ```
//! use bucket_lru::config::SizedLruConfig;
//! use bucket_lru::SizedLruCache;
//! use core::num::{NonZeroU32, NonZeroUsize};
//!
//! let config = SizedLruConfig::new(
//!     NonZeroUsize::new(64).unwrap(),
//!     NonZeroU32::new(100).unwrap(),
//! )
//! .with_initial_items(8)
//! .with_hash_seed(0xBEEF);
//! let mut cache = SizedLruCache::init(config, |_evicted: u32| {}).unwrap();
//!
//! cache.insert(b"thumb/small.png", 1, 40).unwrap();
//! cache.insert(b"thumb/large.png", 2, 55).unwrap();
//! assert_eq!(cache.cache_left(), 5);
//!
//! // Doesn't fit alongside the others: cold cohorts are evicted first.
//! cache.insert(b"thumb/huge.png", 3, 90).unwrap();
//! assert_eq!(cache.fetch(b"thumb/huge.png"), Some(3));
//! ```

extern crate alloc;

use alloc::boxed::Box;

use crate::arena::{try_copy_bytes, Arena, ArenaSlot, NIL};
use crate::config::SizedLruConfig;
use crate::error::Error;
use crate::hash::murmur2;
use crate::links::BucketLru;
use crate::sink::EvictionSink;
use crate::table::BucketTable;

/// One cached binding. Vacant form: `consumption == 0`, no key, `next`
/// chained into the free list.
struct SizedItem {
    key: Option<Box<[u8]>>,
    value: u32,
    consumption: u16,
    next: u32,
}

impl Default for SizedItem {
    fn default() -> Self {
        SizedItem {
            key: None,
            value: 0,
            consumption: 0,
            next: NIL,
        }
    }
}

impl ArenaSlot for SizedItem {
    #[inline]
    fn next(&self) -> u32 {
        self.next
    }

    #[inline]
    fn set_next(&mut self, next: u32) {
        self.next = next;
    }
}

/// Budgeted LRU cache over byte-string keys with per-entry consumption
/// weights and automatic cohort eviction.
///
/// Every value leaving the cache — by budget eviction, explicit
/// [`remove`](Self::remove), [`evict_lru`](Self::evict_lru),
/// [`clear`](Self::clear), or drop — is reported to the [`EvictionSink`]
/// exactly once. Dropping the cache reports remaining values in arena-index
/// order.
///
/// # Example
///
/// ```
/// use bucket_lru::config::SizedLruConfig;
/// use bucket_lru::SizedLruCache;
/// use core::num::{NonZeroU32, NonZeroUsize};
///
/// let config = SizedLruConfig::new(
///     NonZeroUsize::new(16).unwrap(),
///     NonZeroU32::new(10).unwrap(),
/// )
/// .with_hash_seed(3);
/// let mut cache = SizedLruCache::init(config, |_evicted: u32| {}).unwrap();
/// cache.insert(b"a", 1, 10).unwrap();
///
/// // A weight the budget can never hold empties the cache and is rejected.
/// assert!(cache.insert(b"b", 2, 11).is_err());
/// assert!(cache.is_empty());
/// ```
pub struct SizedLruCache<S: EvictionSink> {
    hash_seed: u32,
    cache_size: u32,
    cache_left: u32,
    table: BucketTable,
    lru: BucketLru,
    arena: Arena<SizedItem>,
    len: usize,
    sink: S,
}

impl<S: EvictionSink> SizedLruCache<S> {
    /// Creates a cache from a configuration and an eviction sink.
    ///
    /// Returns [`Error::InvalidArgument`] unless `hash_table_size` is a
    /// power of two no larger than 2³¹, and [`Error::Oom`] if the table,
    /// link array, or initial arena cannot be allocated (nothing is leaked).
    pub fn init(config: SizedLruConfig, sink: S) -> Result<Self, Error> {
        let size = config.hash_table_size().get();
        if !size.is_power_of_two() || size > 1 << 31 {
            return Err(Error::InvalidArgument);
        }
        Ok(SizedLruCache {
            hash_seed: config.hash_seed(),
            cache_size: config.cache_size().get(),
            cache_left: config.cache_size().get(),
            table: BucketTable::new(size)?,
            lru: BucketLru::new(size)?,
            arena: Arena::with_capacity(config.num_initial_items())?,
            len: 0,
            sink,
        })
    }

    /// Number of cached keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bucket rows.
    #[inline]
    pub fn hash_table_size(&self) -> usize {
        self.table.size()
    }

    /// Total consumption budget.
    #[inline]
    pub fn cache_size(&self) -> u32 {
        self.cache_size
    }

    /// Unspent budget. `cache_size - cache_left` is the live consumption.
    #[inline]
    pub fn cache_left(&self) -> u32 {
        self.cache_left
    }

    /// Inserts a key tagged with `value`, weighing `consumption` against the
    /// budget.
    ///
    /// Budget is secured first: least recently used cohorts are evicted
    /// (values to the sink) until the entry fits. The key bytes are copied;
    /// the key must not already be present (debug-assert enforced).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty or over-long key or a
    /// `consumption` outside `1..u16::MAX` (zero is the vacancy sentinel,
    /// the all-ones weight is reserved); [`Error::DoesntFit`] if the weight
    /// exceeds the whole budget — the cache is empty on return;
    /// [`Error::Oom`] if the key copy or arena growth fails after budget was
    /// secured.
    pub fn insert(&mut self, key: &[u8], value: u32, consumption: u16) -> Result<(), Error> {
        if key.is_empty() || key.len() >= u16::MAX as usize {
            return Err(Error::InvalidArgument);
        }
        if consumption == 0 || consumption == u16::MAX {
            return Err(Error::InvalidArgument);
        }
        debug_assert!(self.position_of(key).is_none(), "key already present");

        while self.cache_left < u32::from(consumption) {
            if !self.evict_lru() {
                return Err(Error::DoesntFit);
            }
        }

        // Copy the key before taking a slot: whichever allocation fails,
        // no slot has left the free list.
        let key_copy = try_copy_bytes(key)?;
        let bucket = self.table.bucket_of(murmur2(key, self.hash_seed));
        let index = self.arena.alloc(self.table.size())?;

        let old_head = self.table.head(bucket);
        let item = self.arena.slot_mut(index);
        item.key = Some(key_copy);
        item.value = value;
        item.consumption = consumption;
        item.next = old_head;
        self.table.set_head(bucket, index);

        if old_head == NIL {
            self.lru.push_front(bucket);
        } else {
            self.lru.move_to_front(bucket);
        }
        self.cache_left -= u32::from(consumption);
        self.len += 1;
        Ok(())
    }

    /// Looks up a key, promoting its bucket row on a hit.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn fetch(&mut self, key: &[u8]) -> Option<u32> {
        let (bucket, index, _) = self.position_of(key)?;
        self.lru.move_to_front(bucket);
        Some(self.arena.slot(index).value)
    }

    /// Membership probe without LRU promotion.
    #[inline]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.position_of(key).is_some()
    }

    /// Removes a key, reporting its value to the sink and crediting its
    /// consumption back to the budget.
    ///
    /// Returns `false` (with no side effects) if the key is absent. The
    /// bucket row keeps its recency position unless this removal emptied it.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        let Some((bucket, index, prev)) = self.position_of(key) else {
            return false;
        };
        let next = self.arena.slot(index).next;
        if prev == NIL {
            self.table.set_head(bucket, next);
        } else {
            self.arena.slot_mut(prev).next = next;
        }
        self.retire(index);
        self.len -= 1;
        if self.table.head(bucket) == NIL {
            self.lru.unlink(bucket);
        }
        true
    }

    /// Evicts the least recently used cohort: every key sharing the LRU
    /// tail bucket row, each value reported to the sink and each weight
    /// credited back.
    ///
    /// Returns `false` if the cache is empty.
    pub fn evict_lru(&mut self) -> bool {
        let bucket = self.lru.tail();
        if bucket == NIL {
            return false;
        }
        self.lru.unlink(bucket);
        let mut cursor = self.table.head(bucket);
        self.table.set_head(bucket, NIL);
        while cursor != NIL {
            let next = self.arena.slot(cursor).next;
            self.retire(cursor);
            self.len -= 1;
            cursor = next;
        }
        true
    }

    /// Removes every key, reporting each value to the sink, restoring the
    /// full budget, and rebuilding the free list over the whole arena.
    ///
    /// Values are reported in bucket-table order.
    pub fn clear(&mut self) {
        let table = &self.table;
        let arena = &self.arena;
        let sink = &mut self.sink;
        for bucket in 0..table.size() {
            #[allow(clippy::cast_possible_truncation)]
            let mut cursor = table.head(bucket as u32);
            while cursor != NIL {
                let item = arena.slot(cursor);
                sink.on_evict(item.value);
                cursor = item.next;
            }
        }
        self.table.clear();
        self.lru.clear();
        self.arena.rebuild_free_list();
        self.cache_left = self.cache_size;
        self.len = 0;
    }

    /// Locates `key`: (bucket, item index, predecessor in chain or `NIL`).
    fn position_of(&self, key: &[u8]) -> Option<(u32, u32, u32)> {
        let bucket = self.table.bucket_of(murmur2(key, self.hash_seed));
        let mut prev = NIL;
        let mut cursor = self.table.head(bucket);
        while cursor != NIL {
            let item = self.arena.slot(cursor);
            if item.key.as_deref() == Some(key) {
                return Some((bucket, cursor, prev));
            }
            prev = cursor;
            cursor = item.next;
        }
        None
    }

    /// Reports an item's value, credits its weight, drops its key, and
    /// returns the slot to the free list in vacant form. The caller has
    /// already unlinked the item from its chain.
    fn retire(&mut self, index: u32) {
        let item = self.arena.slot_mut(index);
        let value = item.value;
        self.cache_left += u32::from(item.consumption);
        item.key = None;
        item.value = 0;
        item.consumption = 0;
        self.arena.release(index);
        self.sink.on_evict(value);
    }
}

impl<S: EvictionSink> Drop for SizedLruCache<S> {
    /// Reports every remaining value to the sink in arena-index order.
    fn drop(&mut self) {
        let arena = &self.arena;
        let sink = &mut self.sink;
        for item in arena.iter() {
            if item.consumption != 0 {
                sink.on_evict(item.value);
            }
        }
    }
}

impl<S: EvictionSink> core::fmt::Debug for SizedLruCache<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SizedLruCache")
            .field("hash_table_size", &self.table.size())
            .field("cache_size", &self.cache_size)
            .field("cache_left", &self.cache_left)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::num::{NonZeroU32, NonZeroUsize};

    type Recorder = Rc<RefCell<Vec<u32>>>;

    fn make_cache(
        size: usize,
        initial_items: usize,
        cache_size: u32,
    ) -> (SizedLruCache<impl EvictionSink>, Recorder) {
        let recorder: Recorder = Rc::new(RefCell::new(Vec::new()));
        let evicted = Rc::clone(&recorder);
        let config = SizedLruConfig::new(
            NonZeroUsize::new(size).unwrap(),
            NonZeroU32::new(cache_size).unwrap(),
        )
        .with_initial_items(initial_items)
        .with_hash_seed(0xCAFE_BABE);
        let cache =
            SizedLruCache::init(config, move |value: u32| evicted.borrow_mut().push(value))
                .unwrap();
        (cache, recorder)
    }

    #[test]
    fn test_init_rejects_non_power_of_two() {
        let config = SizedLruConfig::new(
            NonZeroUsize::new(48).unwrap(),
            NonZeroU32::new(10).unwrap(),
        );
        let result = SizedLruCache::init(config, |_v: u32| {});
        assert_eq!(result.err(), Some(Error::InvalidArgument));
    }

    #[test]
    fn test_insert_fetch_roundtrip() {
        let (mut cache, _) = make_cache(16, 2, 100);
        cache.insert(b"123", 123, 10).unwrap();
        assert_eq!(cache.fetch(b"123"), Some(123));
        assert_eq!(cache.fetch(b"456"), None);
        assert_eq!(cache.cache_left(), 90);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_rejects_bad_arguments() {
        let (mut cache, _) = make_cache(16, 2, 100);
        assert_eq!(cache.insert(b"", 1, 1), Err(Error::InvalidArgument));
        assert_eq!(cache.insert(b"key", 1, 0), Err(Error::InvalidArgument));
        // The all-ones weight is reserved alongside the zero sentinel.
        assert_eq!(
            cache.insert(b"key", 1, u16::MAX),
            Err(Error::InvalidArgument)
        );
        assert!(cache.is_empty());
        assert_eq!(cache.cache_left(), 100);
    }

    #[test]
    fn test_budget_eviction_makes_room() {
        // One row: every key shares a cohort, so overflow evicts them all.
        let (mut cache, recorder) = make_cache(1, 0, 10);
        cache.insert(b"a", 1, 4).unwrap();
        cache.insert(b"b", 2, 4).unwrap();
        assert_eq!(cache.cache_left(), 2);

        cache.insert(b"c", 3, 4).unwrap();
        let mut seen = recorder.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);
        assert_eq!(cache.cache_left(), 6);
        assert_eq!(cache.fetch(b"c"), Some(3));
        assert_eq!(cache.fetch(b"a"), None);
    }

    #[test]
    fn test_doesnt_fit_empties_the_cache() {
        let (mut cache, recorder) = make_cache(16, 2, 10);
        cache.insert(b"a", 1, 4).unwrap();
        assert_eq!(cache.insert(b"big", 2, 11), Err(Error::DoesntFit));
        assert_eq!(*recorder.borrow(), [1]);
        assert!(cache.is_empty());
        assert_eq!(cache.cache_left(), cache.cache_size());
    }

    #[test]
    fn test_exact_fit_consumes_whole_budget() {
        let (mut cache, _) = make_cache(16, 2, 10);
        cache.insert(b"all", 1, 10).unwrap();
        assert_eq!(cache.cache_left(), 0);
        assert_eq!(cache.fetch(b"all"), Some(1));
    }

    #[test]
    fn test_remove_credits_budget() {
        let (mut cache, recorder) = make_cache(16, 2, 100);
        cache.insert(b"a", 1, 30).unwrap();
        cache.insert(b"b", 2, 20).unwrap();
        assert_eq!(cache.cache_left(), 50);
        assert!(cache.remove(b"a"));
        assert_eq!(*recorder.borrow(), [1]);
        assert_eq!(cache.cache_left(), 80);
        assert!(!cache.remove(b"a"));
        assert_eq!(cache.cache_left(), 80);
    }

    #[test]
    fn test_evict_lru_empty_returns_false() {
        let (mut cache, _) = make_cache(16, 2, 10);
        assert!(!cache.evict_lru());
    }

    #[test]
    fn test_clear_restores_budget() {
        let (mut cache, recorder) = make_cache(16, 2, 50);
        cache.insert(b"a", 1, 10).unwrap();
        cache.insert(b"b", 2, 20).unwrap();
        cache.clear();
        let mut seen = recorder.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);
        assert!(cache.is_empty());
        assert_eq!(cache.cache_left(), 50);
        cache.insert(b"c", 3, 50).unwrap();
        assert_eq!(cache.fetch(b"c"), Some(3));
    }

    #[test]
    fn test_drop_reports_remaining_values() {
        let (mut cache, recorder) = make_cache(16, 4, 100);
        cache.insert(b"a", 10, 1).unwrap();
        cache.insert(b"b", 20, 1).unwrap();
        drop(cache);
        assert_eq!(*recorder.borrow(), [10, 20]);
    }

    #[test]
    fn test_fetch_promotes_row() {
        let (mut cache, recorder) = make_cache(64, 0, 100);
        let keys = distinct_row_keys(&cache, 3);
        cache.insert(&keys[0], 1, 10).unwrap();
        cache.insert(&keys[1], 2, 10).unwrap();
        cache.insert(&keys[2], 3, 10).unwrap();
        assert_eq!(cache.fetch(&keys[0]), Some(1));
        // Overflow the budget so exactly one cohort must go: the middle key
        // is now the coldest row.
        cache.insert(b"spill", 4, 75).unwrap();
        assert_eq!(*recorder.borrow(), [2]);
        assert_eq!(cache.fetch(&keys[0]), Some(1));
    }

    /// Picks `n` keys guaranteed to land in `n` distinct bucket rows, all
    /// distinct from the row of b"spill".
    fn distinct_row_keys(cache: &SizedLruCache<impl EvictionSink>, n: usize) -> Vec<Vec<u8>> {
        let mut keys: Vec<Vec<u8>> = Vec::new();
        let mut rows: Vec<u32> = Vec::new();
        rows.push(cache.table.bucket_of(murmur2(b"spill", cache.hash_seed)));
        let mut tag: u16 = 0;
        while keys.len() < n {
            let key = alloc::vec![b'k', tag as u8, (tag >> 8) as u8];
            let row = cache.table.bucket_of(murmur2(&key, cache.hash_seed));
            if !rows.contains(&row) {
                rows.push(row);
                keys.push(key);
            }
            tag += 1;
        }
        keys
    }

    // ------------------------------------------------------------------
    // Structural invariants under random operation sequences.
    // ------------------------------------------------------------------

    fn check_invariants(cache: &SizedLruCache<impl EvictionSink>) {
        let size = cache.table.size();

        let mut chained: Vec<u32> = Vec::new();
        let mut live_consumption: u64 = 0;
        for bucket in 0..size {
            #[allow(clippy::cast_possible_truncation)]
            let bucket = bucket as u32;
            let mut cursor = cache.table.head(bucket);
            while cursor != NIL {
                assert!(!chained.contains(&cursor), "index in two chains");
                chained.push(cursor);
                let item = cache.arena.slot(cursor);
                assert_ne!(item.consumption, 0, "chained slot carries no weight");
                live_consumption += u64::from(item.consumption);
                let key = item.key.as_deref().expect("chained slot has a key");
                assert_eq!(
                    cache.table.bucket_of(murmur2(key, cache.hash_seed)),
                    bucket,
                    "item reachable from the wrong bucket"
                );
                cursor = item.next;
            }
        }
        assert_eq!(chained.len(), cache.len());

        // The budget identity.
        assert_eq!(
            live_consumption + u64::from(cache.cache_left),
            u64::from(cache.cache_size),
            "consumption accounting drifted"
        );

        let mut listed: Vec<u32> = Vec::new();
        let mut cursor = cache.lru.head();
        while cursor != NIL {
            assert!(!listed.contains(&cursor), "bucket listed twice");
            listed.push(cursor);
            cursor = cache.lru.next(cursor);
        }
        if let Some(&head) = listed.first() {
            assert_eq!(cache.lru.prev(head), NIL);
            assert_eq!(cache.lru.tail(), *listed.last().unwrap());
        } else {
            assert_eq!(cache.lru.tail(), NIL);
        }
        for bucket in 0..size {
            #[allow(clippy::cast_possible_truncation)]
            let bucket = bucket as u32;
            assert_eq!(
                listed.contains(&bucket),
                cache.table.head(bucket) != NIL,
                "LRU membership must match chain occupancy"
            );
        }

        let mut free: Vec<u32> = Vec::new();
        let mut cursor = cache.arena.first_free();
        while cursor != NIL {
            assert!(!free.contains(&cursor), "slot free-listed twice");
            assert!(!chained.contains(&cursor), "slot both free and chained");
            free.push(cursor);
            let slot = cache.arena.slot(cursor);
            assert_eq!(slot.consumption, 0, "free slot carries weight");
            assert!(slot.key.is_none(), "free slot still owns a key");
            cursor = slot.next;
        }
        assert_eq!(free.len() + chained.len(), cache.arena.capacity());
    }

    mod property_tests {
        use super::*;
        use alloc::collections::BTreeMap;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(u8, u16),
            Fetch(u8),
            Remove(u8),
            EvictLru,
            Clear,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                5 => (any::<u8>(), 1u16..40).prop_map(|(tag, weight)| Op::Insert(tag, weight)),
                3 => any::<u8>().prop_map(Op::Fetch),
                2 => any::<u8>().prop_map(Op::Remove),
                1 => Just(Op::EvictLru),
                1 => Just(Op::Clear),
            ]
        }

        fn key_for(tag: u8) -> Vec<u8> {
            let len = (tag % 5) as usize + 1;
            let mut key = Vec::with_capacity(len);
            for i in 0..len {
                key.push(tag.wrapping_add(i as u8));
            }
            key
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_budget_and_structure_hold(
                table_bits in 0u32..6,
                initial_items in 0usize..5,
                cache_size in 30u32..200,
                ops in proptest::collection::vec(op_strategy(), 1..120)
            ) {
                let (mut cache, recorder) =
                    make_cache(1 << table_bits, initial_items, cache_size);
                // Model: key tag -> (value, consumption). Values are unique,
                // so the sink's report identifies retired keys.
                let mut model: BTreeMap<u8, (u32, u16)> = BTreeMap::new();
                let mut next_value = 1u32;

                for op in ops {
                    match op {
                        Op::Insert(tag, weight) => {
                            if model.contains_key(&tag) {
                                continue;
                            }
                            let result = cache.insert(&key_for(tag), next_value, weight);
                            let seen = recorder.borrow().clone();
                            model.retain(|_, (value, _)| !seen.contains(value));
                            match result {
                                Ok(()) => {
                                    model.insert(tag, (next_value, weight));
                                    next_value += 1;
                                }
                                Err(Error::DoesntFit) => {
                                    prop_assert!(u32::from(weight) > cache_size);
                                    prop_assert!(model.is_empty());
                                }
                                Err(other) => prop_assert!(false, "unexpected {:?}", other),
                            }
                        }
                        Op::Fetch(tag) => {
                            let got = cache.fetch(&key_for(tag));
                            prop_assert_eq!(got, model.get(&tag).map(|(value, _)| *value));
                        }
                        Op::Remove(tag) => {
                            let removed = cache.remove(&key_for(tag));
                            prop_assert_eq!(removed, model.remove(&tag).is_some());
                        }
                        Op::EvictLru => {
                            let evicted = cache.evict_lru();
                            prop_assert_eq!(evicted, !model.is_empty());
                            let seen = recorder.borrow().clone();
                            model.retain(|_, (value, _)| !seen.contains(value));
                        }
                        Op::Clear => {
                            cache.clear();
                            model.clear();
                        }
                    }
                    recorder.borrow_mut().clear();
                    check_invariants(&cache);
                    prop_assert_eq!(cache.len(), model.len());
                }

                for (tag, (value, _)) in &model {
                    prop_assert_eq!(cache.fetch(&key_for(*tag)), Some(*value));
                }
            }
        }
    }
}
