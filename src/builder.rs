//! Construction-time configuration for timed rings.
//!
//! A ring's capacity and overwrite policy are fixed once it is built; the
//! builder collects both and validates them in one place.
//!
//! ## Example
//!
//! ```rust
//! use timering::builder::TimedRingBuilder;
//! use timering::ds::OverwritePolicy;
//!
//! let mut ring = TimedRingBuilder::new(3)
//!     .policy(OverwritePolicy::FullCapacity)
//!     .build::<&str, u32>()
//!     .unwrap();
//! ring.extend([("a", 1), ("b", 2), ("c", 3)]);
//! assert_eq!(ring.len(), 3);
//! ```

#[cfg(feature = "concurrency")]
use crate::ds::ConcurrentTimedRing;
use crate::ds::{DEFAULT_CAPACITY, OverwritePolicy, TimedRingBuffer};
use crate::error::RingError;

/// Builder for [`TimedRingBuffer`] instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedRingBuilder {
    capacity: usize,
    policy: OverwritePolicy,
}

impl TimedRingBuilder {
    /// Create a new builder with the specified number of slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: OverwritePolicy::default(),
        }
    }

    /// Set the overwrite policy.
    pub fn policy(mut self, policy: OverwritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of slots the built ring will allocate.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples the built ring will retain.
    pub fn live_limit(&self) -> usize {
        self.policy.live_limit(self.capacity)
    }

    /// Build a ring.
    ///
    /// # Type Parameters
    ///
    /// - `T`: Sample value type
    /// - `Time`: Timestamp type; searches require [`Timestamp`](crate::time::Timestamp)
    ///
    /// Fails with [`RingError::InvalidCapacity`] when the capacity is 0.
    pub fn build<T, Time>(self) -> Result<TimedRingBuffer<T, Time>, RingError> {
        TimedRingBuffer::with_policy(self.capacity, self.policy)
    }

    /// Build a ring wrapped for shared use across threads.
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<T, Time>(self) -> Result<ConcurrentTimedRing<T, Time>, RingError> {
        ConcurrentTimedRing::with_policy(self.capacity, self.policy)
    }
}

impl Default for TimedRingBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
