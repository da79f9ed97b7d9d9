//! Construction parameters for both cache structures.
//!
//! Each structure has a dedicated config struct: `new()` takes the required
//! parameters, `with_*` builders set the optional ones, and read-only
//! accessors expose everything. Structural validation happens at `init`,
//! which rejects a non-power-of-two `hash_table_size` with
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument).
//!
//! # Sizing guidelines
//!
//! - **`hash_table_size`** fixes the number of bucket rows and therefore the
//!   recency resolution: keys hashing to the same row share one LRU position
//!   and are evicted as a cohort. More rows, finer cohorts, more memory
//!   (one head index plus two link indices per row).
//! - **`num_initial_items`** pre-sizes the item arena. The default of zero
//!   defers the first arena allocation to the first insert, which then grows
//!   straight to `hash_table_size` slots. Arena capacity doubles on
//!   exhaustion afterwards.
//!
//! # Examples
//!
//! ```
//! use bucket_lru::config::TrackerConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = TrackerConfig::new(NonZeroUsize::new(256).unwrap(), u32::MAX)
//!     .with_initial_items(64)
//!     .with_hash_seed(0xCAFE_BABE);
//!
//! assert_eq!(config.hash_table_size().get(), 256);
//! assert_eq!(config.invalid_value(), u32::MAX);
//! ```

use core::fmt;
use core::num::{NonZeroU32, NonZeroUsize};

/// Configuration for an [`LruTracker`](crate::LruTracker).
///
/// # Examples
///
/// ```
/// use bucket_lru::config::TrackerConfig;
/// use bucket_lru::LruTracker;
/// use core::num::NonZeroUsize;
///
/// let config = TrackerConfig::new(NonZeroUsize::new(16).unwrap(), 0).with_hash_seed(7);
/// let tracker = LruTracker::init(config, |_evicted: u32| {}).unwrap();
/// assert!(tracker.is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct TrackerConfig {
    /// Number of bucket rows; must be a power of two
    hash_table_size: NonZeroUsize,

    /// Initial item-arena capacity
    num_initial_items: usize,

    /// Seed folded into every key hash
    hash_seed: u32,

    /// Reserved value that no live binding may carry
    invalid_value: u32,
}

impl TrackerConfig {
    /// Creates a new configuration for an LRU tracker.
    ///
    /// The arena starts empty and the hash seed is zero; use
    /// [`with_initial_items`](Self::with_initial_items) and
    /// [`with_hash_seed`](Self::with_hash_seed) to override.
    ///
    /// # Arguments
    /// * `hash_table_size` - Number of bucket rows; must be a power of two
    /// * `invalid_value` - Reserved value that no live binding may carry
    pub fn new(hash_table_size: NonZeroUsize, invalid_value: u32) -> Self {
        Self {
            hash_table_size,
            num_initial_items: 0,
            hash_seed: 0,
            invalid_value,
        }
    }

    /// Sets the initial item-arena capacity.
    ///
    /// Zero (the default) defers the first arena allocation to the first
    /// insert.
    pub fn with_initial_items(mut self, num_initial_items: usize) -> Self {
        self.num_initial_items = num_initial_items;
        self
    }

    /// Sets the seed folded into every key hash.
    pub fn with_hash_seed(mut self, hash_seed: u32) -> Self {
        self.hash_seed = hash_seed;
        self
    }

    /// Returns the number of bucket rows.
    pub fn hash_table_size(&self) -> NonZeroUsize {
        self.hash_table_size
    }

    /// Returns the initial item-arena capacity.
    pub fn num_initial_items(&self) -> usize {
        self.num_initial_items
    }

    /// Returns the hash seed.
    pub fn hash_seed(&self) -> u32 {
        self.hash_seed
    }

    /// Returns the reserved value. Inserting it is rejected; released arena
    /// slots park it so a vacant slot never aliases a live binding.
    pub fn invalid_value(&self) -> u32 {
        self.invalid_value
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("hash_table_size", &self.hash_table_size)
            .field("num_initial_items", &self.num_initial_items)
            .field("hash_seed", &self.hash_seed)
            .field("invalid_value", &self.invalid_value)
            .finish()
    }
}

/// Configuration for a [`SizedLruCache`](crate::SizedLruCache).
///
/// # Examples
///
/// ```
/// use bucket_lru::config::SizedLruConfig;
/// use bucket_lru::SizedLruCache;
/// use core::num::{NonZeroU32, NonZeroUsize};
///
/// let config = SizedLruConfig::new(
///     NonZeroUsize::new(64).unwrap(),
///     NonZeroU32::new(10_000).unwrap(),
/// )
/// .with_initial_items(16);
///
/// let cache = SizedLruCache::init(config, |_evicted: u32| {}).unwrap();
/// assert_eq!(cache.cache_left(), 10_000);
/// ```
#[derive(Clone, Copy)]
pub struct SizedLruConfig {
    /// Number of bucket rows; must be a power of two
    hash_table_size: NonZeroUsize,

    /// Initial item-arena capacity
    num_initial_items: usize,

    /// Seed folded into every key hash
    hash_seed: u32,

    /// Total consumption budget
    cache_size: NonZeroU32,
}

impl SizedLruConfig {
    /// Creates a new configuration for a sized LRU cache.
    ///
    /// The arena starts empty and the hash seed is zero; use
    /// [`with_initial_items`](Self::with_initial_items) and
    /// [`with_hash_seed`](Self::with_hash_seed) to override.
    ///
    /// # Arguments
    /// * `hash_table_size` - Number of bucket rows; must be a power of two
    /// * `cache_size` - Total consumption budget
    pub fn new(hash_table_size: NonZeroUsize, cache_size: NonZeroU32) -> Self {
        Self {
            hash_table_size,
            num_initial_items: 0,
            hash_seed: 0,
            cache_size,
        }
    }

    /// Sets the initial item-arena capacity.
    ///
    /// Zero (the default) defers the first arena allocation to the first
    /// insert.
    pub fn with_initial_items(mut self, num_initial_items: usize) -> Self {
        self.num_initial_items = num_initial_items;
        self
    }

    /// Sets the seed folded into every key hash.
    pub fn with_hash_seed(mut self, hash_seed: u32) -> Self {
        self.hash_seed = hash_seed;
        self
    }

    /// Returns the number of bucket rows.
    pub fn hash_table_size(&self) -> NonZeroUsize {
        self.hash_table_size
    }

    /// Returns the initial item-arena capacity.
    pub fn num_initial_items(&self) -> usize {
        self.num_initial_items
    }

    /// Returns the hash seed.
    pub fn hash_seed(&self) -> u32 {
        self.hash_seed
    }

    /// Returns the total consumption budget. Inserts that would overflow it
    /// evict least-recently-used cohorts until the new entry fits.
    pub fn cache_size(&self) -> NonZeroU32 {
        self.cache_size
    }
}

impl fmt::Debug for SizedLruConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizedLruConfig")
            .field("hash_table_size", &self.hash_table_size)
            .field("num_initial_items", &self.num_initial_items)
            .field("hash_seed", &self.hash_seed)
            .field("cache_size", &self.cache_size)
            .finish()
    }
}
