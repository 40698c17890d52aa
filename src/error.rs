//! Error types for the timering library.
//!
//! ## Key Components
//!
//! - [`RingError`]: Returned by fallible buffer operations: construction with an
//!   unusable capacity, and random access outside the live range.
//! - [`InvariantError`]: Returned when internal ring invariants are violated
//!   (`check_invariants` methods).
//!
//! Time-based searches never fail. A search that finds no sample within the
//! threshold returns `None`, which is an ordinary outcome rather than an error.
//!
//! ## Example Usage
//!
//! ```
//! use timering::ds::TimedRingBuffer;
//! use timering::error::RingError;
//!
//! // Zero capacity is rejected up front
//! let bad = TimedRingBuffer::<f32, u64>::new(0);
//! assert_eq!(bad.unwrap_err(), RingError::InvalidCapacity { requested: 0 });
//!
//! // Reading from an empty buffer is an explicit error
//! let ring = TimedRingBuffer::<f32, u64>::new(4).unwrap();
//! assert_eq!(ring.get_head(), Err(RingError::EmptyBufferAccess));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// RingError
// ---------------------------------------------------------------------------

/// Error returned by fallible [`TimedRingBuffer`](crate::ds::TimedRingBuffer)
/// operations.
///
/// All variants describe caller mistakes that are reported at the call site;
/// none of them leave the buffer in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// The requested capacity cannot hold any slot.
    InvalidCapacity {
        /// Capacity passed to the constructor.
        requested: usize,
    },
    /// A logical index was outside `[0, len)`.
    OutOfRange {
        /// Logical index that was requested.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// An element was requested from a buffer holding no live elements.
    EmptyBufferAccess,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::InvalidCapacity { requested } => {
                write!(f, "capacity must be > 0 (got {requested})")
            },
            RingError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for ring of length {len}")
            },
            RingError::EmptyBufferAccess => f.write_str("access into an empty ring"),
        }
    }
}

impl std::error::Error for RingError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal ring invariants are violated.
///
/// Produced by [`TimedRingBuffer::check_invariants`](crate::ds::TimedRingBuffer::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
