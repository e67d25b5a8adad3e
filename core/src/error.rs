//! Errors reported by [`FixedArray`](crate::FixedArray).
//!
//! Every checked operation either fully succeeds or returns one of these
//! without touching the array.

use thiserror::Error;

/// Error type for all fallible [`FixedArray`](crate::FixedArray) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Copy-assignment between sequences of different lengths.
    ///
    /// The length of a fixed array never changes, so the receiver cannot
    /// adopt the source's length.
    #[error("cannot copy-assign a sequence of size {found} into a fixed array of size {expected}")]
    IncompatibleSize {
        /// Length of the receiving array.
        expected: usize,
        /// Length of the source sequence.
        found: usize,
    },

    /// Bounds-checked access past the end of the array.
    #[error("cannot access element at position {pos} of a fixed array of size {len}")]
    OutOfRange { pos: usize, len: usize },

    /// The requested element count does not fit in a single allocation.
    #[error("capacity overflow: {count} elements exceed the maximum allocation size")]
    CapacityOverflow { count: usize },

    /// The allocator refused to provide the buffer.
    #[error("allocation of a buffer for {count} elements failed")]
    AllocFailed { count: usize },
}

impl Error {
    /// Returns `true` for errors raised while acquiring the buffer.
    pub fn is_alloc_error(&self) -> bool {
        matches!(
            self,
            Error::CapacityOverflow { .. } | Error::AllocFailed { .. }
        )
    }
}
