//! Error type shared by both cache structures.

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

/// Errors reported by cache operations.
///
/// Absence is never an error: a missed lookup returns `None`, removing an
/// absent key returns `false`, and evicting from an empty structure returns
/// `false`. This enum covers the cases where an operation could not be
/// carried out at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An argument violated a documented precondition: an empty or oversized
    /// key, a reserved value, a zero consumption weight, or a construction
    /// parameter out of range (e.g. a non-power-of-two table size).
    InvalidArgument,

    /// The allocator refused to provide memory. The structure is unchanged
    /// and remains usable; the caller may retry after freeing memory.
    Oom,

    /// The entry's consumption weight exceeds what the budget can ever hold,
    /// even with every other entry evicted. The cache is empty on return.
    DoesntFit,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "argument violates a documented precondition"),
            Error::Oom => write!(f, "allocation failed"),
            Error::DoesntFit => write!(f, "entry consumption exceeds the cache budget"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
