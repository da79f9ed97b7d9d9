#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! Quick API orientation for the two structures.
//!
//! ## Which structure should I use?
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Do entries have a size/weight and a fixed total budget?             │
//! │                                                                      │
//! │     No ──▶ LruTracker    you decide when to evict; the tracker       │
//! │                          only keeps the recency order for you        │
//! │                                                                      │
//! │     Yes ─▶ SizedLruCache inserts evict cold cohorts automatically    │
//! │                          until the new entry fits the budget         │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both share one internal design: keys hash into a power-of-two table of
//! bucket rows, items live in an index-addressed arena, and recency is
//! tracked per *row* in a doubly-linked list threaded through a flat link
//! array. Eviction therefore retires a whole row cohort at a time — the
//! deliberate trade for halving link storage and keeping LRU surgery off
//! the item records.
//!
//! ## Quick reference
//!
//! | | [`LruTracker`] | [`SizedLruCache`] |
//! |---|---|---|
//! | Capacity | unbounded | fixed consumption budget |
//! | Insert | [`insert(key, value)`](LruTracker::insert) | [`insert(key, value, consumption)`](SizedLruCache::insert) |
//! | Lookup (promotes) | [`lookup`](LruTracker::lookup) | [`fetch`](SizedLruCache::fetch) |
//! | Probe (no promotion) | [`contains`](LruTracker::contains) | [`contains`](SizedLruCache::contains) |
//! | Evict coldest cohort | caller calls [`evict_lru`](LruTracker::evict_lru) | automatic on overflow, or [`evict_lru`](SizedLruCache::evict_lru) |
//! | Overflow behavior | n/a | [`Error::DoesntFit`] once empty |
//!
//! ## Examples
//!
//! ### Tracking keys with caller-driven eviction
//!
//! ```
//! use bucket_lru::config::TrackerConfig;
//! use bucket_lru::LruTracker;
//! use core::num::NonZeroUsize;
//!
//! let config = TrackerConfig::new(NonZeroUsize::new(256).unwrap(), 0)
//!     .with_initial_items(16)
//!     .with_hash_seed(0xCAFE_BABE);
//! let mut tracker = LruTracker::init(config, |evicted: u32| {
//!     // Release the resource handle `evicted` stands for.
//!     let _ = evicted;
//! })
//! .unwrap();
//!
//! tracker.insert(b"mesh/rock_03", 7).unwrap();
//! assert_eq!(tracker.lookup(b"mesh/rock_03"), Some(7));
//!
//! // Under memory pressure, shed the coldest cohort.
//! while tracker.len() > 1_000 {
//!     tracker.evict_lru();
//! }
//! ```
//!
//! ### Budgeted caching with automatic eviction
//!
//! ```
//! use bucket_lru::config::SizedLruConfig;
//! use bucket_lru::SizedLruCache;
//! use core::num::{NonZeroU32, NonZeroUsize};
//!
//! let config = SizedLruConfig::new(
//!     NonZeroUsize::new(64).unwrap(),
//!     NonZeroU32::new(4096).unwrap(),
//! )
//! .with_hash_seed(42);
//! let mut cache = SizedLruCache::init(config, |_evicted: u32| {}).unwrap();
//!
//! cache.insert(b"glyph/a", 1, 64).unwrap();
//! cache.insert(b"glyph/b", 2, 64).unwrap();
//! assert_eq!(cache.fetch(b"glyph/a"), Some(1));
//! assert_eq!(cache.cache_left(), 4096 - 128);
//! ```
//!
//! ## Modules
//!
//! - [`tracker`]: unbounded LRU key tracking, eviction on demand
//! - [`sized`]: budget-bounded LRU caching, eviction on overflow
//! - [`config`]: construction parameter structs
//! - [`sink`]: the [`EvictionSink`] observer seam

#![no_std]

/// Construction parameters for both cache structures.
pub mod config;

/// Eviction observer seam.
///
/// Every value whose binding leaves a structure is reported here exactly
/// once; any `FnMut(u32)` closure qualifies.
pub mod sink;

/// LRU key tracking with caller-driven eviction.
pub mod tracker;

/// Size-budgeted LRU caching with automatic eviction.
pub mod sized;

// Internal machinery shared by both structures.
mod arena;
mod error;
mod hash;
mod links;
mod table;

// Re-export cache types
pub use sized::SizedLruCache;
pub use tracker::LruTracker;

// Re-export the seam types
pub use error::Error;
pub use sink::EvictionSink;
