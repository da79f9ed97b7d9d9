//! Eviction observer seam.
//!
//! Values are opaque to the cache structures; the sink is the single point
//! where ownership of a value hands back to the host. Every path on which a
//! binding leaves a structure — explicit removal, cohort eviction, budget
//! eviction, [`clear`](crate::LruTracker::clear), and drop — reports the
//! value here exactly once.

/// Receives values as their bindings leave a cache structure.
///
/// The sink is invoked synchronously on the thread performing the triggering
/// operation and must not call back into the same structure (it receives
/// only the value, so this is enforced structurally unless the sink smuggles
/// a handle through interior mutability).
///
/// Any `FnMut(u32)` closure is a sink:
///
/// ```
/// use bucket_lru::EvictionSink;
///
/// fn takes_sink(mut sink: impl EvictionSink) {
///     sink.on_evict(42);
/// }
///
/// let mut seen = Vec::new();
/// takes_sink(|value: u32| seen.push(value));
/// ```
pub trait EvictionSink {
    /// Called once per value whose binding is leaving the structure.
    fn on_evict(&mut self, value: u32);
}

impl<F: FnMut(u32)> EvictionSink for F {
    #[inline]
    fn on_evict(&mut self, value: u32) {
        self(value)
    }
}
