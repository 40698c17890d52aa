pub mod timed_ring;

#[cfg(feature = "concurrency")]
pub use timed_ring::ConcurrentTimedRing;
pub use timed_ring::{DEFAULT_CAPACITY, IntoIter, Iter, OverwritePolicy, TimedRingBuffer};
