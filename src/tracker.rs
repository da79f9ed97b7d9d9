//! LRU key tracking with caller-driven eviction.
//!
//! An [`LruTracker`] is a set of byte-string keys, each tagged with an opaque
//! 32-bit value. It has no capacity limit: the host decides when to shed
//! entries by calling [`evict_lru`](LruTracker::evict_lru), which retires the
//! least recently used *cohort* in one call.
//!
//! # How it works
//!
//! Keys hash into a power-of-two table of bucket rows. Collisions chain
//! through an index-addressed item arena. Recency is tracked per *row*, not
//! per item: a doubly-linked list threads the non-empty rows, and touching
//! any key promotes its whole row.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                           LruTracker                              │
//! │                                                                   │
//! │  bucket table        item arena                row-LRU list       │
//! │  ┌─────────┐        ┌──────────────────┐                          │
//! │  │ row 0 ──┼──────▶ │ "cat" → "carp"   │      head ─▶ row 3       │
//! │  │ row 1   │        │ (collision chain)│            ◀─▶ row 0     │
//! │  │ row 2   │        │                  │            ◀─▶ row 7     │
//! │  │ row 3 ──┼──────▶ │ "axe"            │      tail ─▶ row 7       │
//! │  │  ...    │        │  free ─▶ free ─▶ │      (eviction cohort)   │
//! │  └─────────┘        └──────────────────┘                          │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trade is deliberate: per-row linking halves the link storage and
//! keeps LRU surgery off the item records, at the cost of eviction
//! granularity — `evict_lru` retires every key sharing the coldest row.
//!
//! # Operations
//!
//! | Operation | LRU effect | Cost |
//! |-----------|------------|------|
//! | `insert` | row to head | O(1) amortized |
//! | `lookup` hit | row to head | O(chain) |
//! | `lookup` miss | none | O(chain) |
//! | `remove` (row still non-empty) | none | O(chain) |
//! | `remove` (row emptied) | row unlinked | O(chain) |
//! | `evict_lru` | tail row unlinked | O(cohort) |
//!
//! # Examples
//!
//! ```
//! use bucket_lru::config::TrackerConfig;
//! use bucket_lru::LruTracker;
//! use core::num::NonZeroUsize;
//!
//! let config = TrackerConfig::new(NonZeroUsize::new(256).unwrap(), 0)
//!     .with_initial_items(8)
//!     .with_hash_seed(0xCAFE_BABE);
//! let mut tracker = LruTracker::init(config, |_evicted: u32| {}).unwrap();
//!
//! tracker.insert(b"texture/grass", 17).unwrap();
//! assert_eq!(tracker.lookup(b"texture/grass"), Some(17));
//! assert_eq!(tracker.lookup(b"texture/sand"), None);
//!
//! assert!(tracker.remove(b"texture/grass"));
//! assert!(!tracker.remove(b"texture/grass"));
//! ```

extern crate alloc;

use alloc::boxed::Box;

use crate::arena::{try_copy_bytes, Arena, ArenaSlot, NIL};
use crate::config::TrackerConfig;
use crate::error::Error;
use crate::hash::murmur2;
use crate::links::BucketLru;
use crate::sink::EvictionSink;
use crate::table::BucketTable;

/// One key binding in the arena. Vacant form: no key, `next` chained into
/// the free list, value parked at the tracker's `invalid_value`.
struct TrackerItem {
    key: Option<Box<[u8]>>,
    value: u32,
    next: u32,
}

impl Default for TrackerItem {
    fn default() -> Self {
        TrackerItem {
            key: None,
            value: 0,
            next: NIL,
        }
    }
}

impl ArenaSlot for TrackerItem {
    #[inline]
    fn next(&self) -> u32 {
        self.next
    }

    #[inline]
    fn set_next(&mut self, next: u32) {
        self.next = next;
    }
}

/// Unbounded set of byte-string keys tagged with `u32` values, ordered for
/// eviction by per-bucket-row recency.
///
/// Eviction is caller-driven: nothing leaves the tracker until the host
/// calls [`remove`](Self::remove), [`evict_lru`](Self::evict_lru),
/// [`clear`](Self::clear), or drops it. Every departing value is reported to
/// the [`EvictionSink`] exactly once.
///
/// Dropping the tracker reports remaining values in **arena-index order**
/// (not recency order); hosts may rely only on the see-every-value-once
/// guarantee, not on ordering.
///
/// # Example
///
/// ```
/// use bucket_lru::config::TrackerConfig;
/// use bucket_lru::LruTracker;
/// use core::num::NonZeroUsize;
///
/// let config = TrackerConfig::new(NonZeroUsize::new(16).unwrap(), u32::MAX)
///     .with_initial_items(2)
///     .with_hash_seed(1);
/// let mut tracker = LruTracker::init(config, |_evicted: u32| {}).unwrap();
/// tracker.insert(b"alpha", 1).unwrap();
/// tracker.insert(b"beta", 2).unwrap();
///
/// // Retire the least recently used cohort.
/// assert!(tracker.evict_lru());
/// ```
pub struct LruTracker<S: EvictionSink> {
    hash_seed: u32,
    invalid_value: u32,
    table: BucketTable,
    lru: BucketLru,
    arena: Arena<TrackerItem>,
    len: usize,
    sink: S,
}

impl<S: EvictionSink> LruTracker<S> {
    /// Creates a tracker from a configuration and an eviction sink.
    ///
    /// Returns [`Error::InvalidArgument`] unless `hash_table_size` is a
    /// power of two no larger than 2³¹, and [`Error::Oom`] if the table,
    /// link array, or initial arena cannot be allocated (nothing is leaked).
    pub fn init(config: TrackerConfig, sink: S) -> Result<Self, Error> {
        let size = config.hash_table_size().get();
        if !size.is_power_of_two() || size > 1 << 31 {
            return Err(Error::InvalidArgument);
        }
        Ok(LruTracker {
            hash_seed: config.hash_seed(),
            invalid_value: config.invalid_value(),
            table: BucketTable::new(size)?,
            lru: BucketLru::new(size)?,
            arena: Arena::with_capacity(config.num_initial_items())?,
            len: 0,
            sink,
        })
    }

    /// Number of tracked keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bucket rows.
    #[inline]
    pub fn hash_table_size(&self) -> usize {
        self.table.size()
    }

    /// Inserts a key tagged with `value`.
    ///
    /// The key bytes are copied; the tracker owns the copy until the binding
    /// leaves. The key must not already be present (debug-assert enforced).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for an empty or over-long key or a `value`
    /// equal to the configured `invalid_value`; [`Error::Oom`] if the key
    /// copy or arena growth fails, in which case the tracker is unchanged.
    pub fn insert(&mut self, key: &[u8], value: u32) -> Result<(), Error> {
        if key.is_empty() || key.len() >= u32::MAX as usize {
            return Err(Error::InvalidArgument);
        }
        if value == self.invalid_value {
            return Err(Error::InvalidArgument);
        }
        debug_assert!(self.position_of(key).is_none(), "key already present");

        // Copy the key before taking a slot: whichever allocation fails,
        // no slot has left the free list.
        let key_copy = try_copy_bytes(key)?;
        let bucket = self.table.bucket_of(murmur2(key, self.hash_seed));
        let index = self.arena.alloc(self.table.size())?;

        let old_head = self.table.head(bucket);
        let item = self.arena.slot_mut(index);
        item.key = Some(key_copy);
        item.value = value;
        item.next = old_head;
        self.table.set_head(bucket, index);

        if old_head == NIL {
            self.lru.push_front(bucket);
        } else {
            self.lru.move_to_front(bucket);
        }
        self.len += 1;
        Ok(())
    }

    /// Looks up a key, promoting its bucket row on a hit.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn lookup(&mut self, key: &[u8]) -> Option<u32> {
        let (bucket, index, _) = self.position_of(key)?;
        self.lru.move_to_front(bucket);
        Some(self.arena.slot(index).value)
    }

    /// Membership probe without LRU promotion.
    #[inline]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.position_of(key).is_some()
    }

    /// Removes a key, reporting its value to the sink.
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

    /// Retires the least recently used cohort: every key sharing the LRU
    /// tail bucket row, each value reported to the sink.
    ///
    /// Returns `false` if the tracker is empty.
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

    /// Removes every key, reporting each value to the sink, and rebuilds the
    /// free list over the whole arena.
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

    /// Reports an item's value, drops its key, and returns the slot to the
    /// free list with `invalid_value` parked in it. The caller has already
    /// unlinked the item from its chain.
    fn retire(&mut self, index: u32) {
        let invalid_value = self.invalid_value;
        let item = self.arena.slot_mut(index);
        let value = item.value;
        item.key = None;
        item.value = invalid_value;
        self.arena.release(index);
        self.sink.on_evict(value);
    }
}

impl<S: EvictionSink> Drop for LruTracker<S> {
    /// Reports every remaining value to the sink in arena-index order.
    fn drop(&mut self) {
        let arena = &self.arena;
        let sink = &mut self.sink;
        for item in arena.iter() {
            if item.key.is_some() {
                sink.on_evict(item.value);
            }
        }
    }
}

impl<S: EvictionSink> core::fmt::Debug for LruTracker<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruTracker")
            .field("hash_table_size", &self.table.size())
            .field("len", &self.len)
            .finish()
    }
}
