//! Fixed-capacity ring of timestamped samples with nearest-time lookup.
//!
//! Stores the most recent samples of a time series, each paired with the time
//! it was taken. Inserting into a full ring silently evicts the oldest sample.
//! Lookups find the stored sample closest to a query time (optionally only
//! samples strictly before it) or one whose time matches exactly. Lookups never
//! interpolate: they always name a stored sample.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                TimedRingBuffer<T, Time>, capacity = 5                       │
//! │                                                                             │
//! │   slots: Vec<Option<Slot { value: T, time: Option<Time> }>>                 │
//! │   head: oldest live slot     tail: next write     len: live count           │
//! │                                                                             │
//! │   After push_at(a,1) .. push_at(f,6) with ReserveSlot (live limit = 4):     │
//! │                                                                             │
//! │   Physical:   0       1       2       3       4                             │
//! │            ┌───────┬───────┬───────┬───────┬───────┐                        │
//! │   slots:   │ (f,6) │  ---  │ (c,3) │ (d,4) │ (e,5) │                        │
//! │            └───────┴───────┴───────┴───────┴───────┘                        │
//! │                ▲       ▲       ▲                                            │
//! │                │       │       └── head = 2 (logical 0, oldest)             │
//! │                │       └────────── tail = 1 (next write)                    │
//! │                └────────────────── logical 3 (newest)                       │
//! │                                                                             │
//! │   logical i  ->  physical (head + i) % capacity                             │
//! │                                                                             │
//! │   push_at(g, 7) at the live limit:                                          │
//! │     1. drop slot[head], head = 3, len = 3      (evict (c,3))                │
//! │     2. slot[tail] = (g,7), tail = 2, len = 4                                │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overwrite Policies
//!
//! | Policy                              | Live limit     | Evicts when          |
//! |-------------------------------------|----------------|----------------------|
//! | [`OverwritePolicy::ReserveSlot`]    | `capacity - 1` | one slot from tail meeting head |
//! | [`OverwritePolicy::FullCapacity`]   | `capacity`     | every slot is live   |
//!
//! `ReserveSlot` is the default. It keeps one slot free at all times, so a ring
//! built with capacity `C` retains at most `C - 1` samples and a capacity-1 ring
//! retains none. Choose `FullCapacity` for a conventional ring.
//!
//! ## Operations
//!
//! | Operation                    | Description                               | Complexity |
//! |------------------------------|-------------------------------------------|------------|
//! | [`push`] / [`push_at`]       | Append, evicting the oldest at the limit  | O(1)       |
//! | [`pop_front`]                | Drop the oldest sample                    | O(1)       |
//! | [`get`] / [`sample`]         | Logical random access                     | O(1)       |
//! | [`find_closest`]             | Nearest sample within `epsilon`           | O(len)     |
//! | [`find_closest_preceding`]   | Nearest sample strictly before a time     | O(len)     |
//! | [`find_exact`]               | Oldest sample with an equal time          | O(len)     |
//! | [`to_vec`] / [`to_ref_vec`]  | Snapshot oldest to newest                 | O(len)     |
//!
//! [`push`]: TimedRingBuffer::push
//! [`push_at`]: TimedRingBuffer::push_at
//! [`pop_front`]: TimedRingBuffer::pop_front
//! [`get`]: TimedRingBuffer::get
//! [`sample`]: TimedRingBuffer::sample
//! [`find_closest`]: TimedRingBuffer::find_closest
//! [`find_closest_preceding`]: TimedRingBuffer::find_closest_preceding
//! [`find_exact`]: TimedRingBuffer::find_exact
//! [`to_vec`]: TimedRingBuffer::to_vec
//! [`to_ref_vec`]: TimedRingBuffer::to_ref_vec
//!
//! ## Example Usage
//!
//! ```
//! use timering::ds::TimedRingBuffer;
//!
//! let mut ring = TimedRingBuffer::<&str, f64>::new(5).unwrap();
//! ring.push_at("a", 1.0);
//! ring.push_at("b", 2.0);
//! ring.push_at("c", 3.0);
//! ring.push_at("d", 4.0);
//!
//! let idx = ring.find_closest(&3.1, 0.5).unwrap();
//! assert_eq!(ring.get(idx), Ok(&"c"));
//! assert_eq!(ring.find_closest(&10.0, 0.5), None);
//!
//! // Only samples strictly before the query time qualify
//! let idx = ring.find_closest_preceding(&3.0, 5.0).unwrap();
//! assert_eq!(ring.get(idx), Ok(&"b"));
//! ```
//!
//! ## Thread Safety
//!
//! `TimedRingBuffer` is not thread-safe. Share it behind a lock, or enable the
//! `concurrency` feature for `ConcurrentTimedRing`, which wraps it in a
//! `parking_lot::RwLock`.
//!
//! ## Implementation Notes
//!
//! - Backed by a single `Vec` allocated once at construction; never reallocates
//! - Evicted and popped samples are dropped immediately; non-live slots are `None`
//! - Samples pushed without a time are skipped by every search
//! - `check_invariants()` is always available, `debug_validate_invariants()` in
//!   debug/test builds

use std::iter::FusedIterator;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{InvariantError, RingError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TimedRingMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TimedRingMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsReset, MetricsSnapshotProvider, RingMetricsReadRecorder, RingMetricsRecorder,
};
use crate::time::Timestamp;

/// Capacity used by [`TimedRingBuffer::default`].
pub const DEFAULT_CAPACITY: usize = 64;

/// How a ring decides it is full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OverwritePolicy {
    /// Evict once `len == capacity - 1`, keeping one slot permanently free.
    #[default]
    ReserveSlot,
    /// Evict only once every slot holds a live sample.
    FullCapacity,
}

impl OverwritePolicy {
    /// Maximum number of live samples a ring of `capacity` slots retains.
    #[inline]
    pub fn live_limit(self, capacity: usize) -> usize {
        match self {
            OverwritePolicy::ReserveSlot => capacity.saturating_sub(1),
            OverwritePolicy::FullCapacity => capacity,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<T, Time> {
    value: T,
    time: Option<Time>,
}

/// Fixed-capacity ring buffer of `(value, time)` samples.
///
/// Logical index 0 is the oldest live sample and `len() - 1` the newest.
/// Indices returned by the `find_*` searches are logical and stay valid until
/// the next mutating call.
///
/// # Example
///
/// ```
/// use timering::ds::TimedRingBuffer;
///
/// let mut ring = TimedRingBuffer::<char, u32>::new(3).unwrap();
/// ring.push_at('A', 1);
/// ring.push_at('B', 2);
/// ring.push_at('C', 3);
/// ring.push_at('D', 4);
///
/// // Capacity 3 retains two samples under the default policy
/// assert_eq!(ring.len(), 2);
/// assert_eq!(ring.to_vec(), vec!['C', 'D']);
/// assert_eq!(ring.find_exact(&1), None);
/// assert_eq!(ring.find_exact(&4), Some(1));
/// ```
#[derive(Debug)]
pub struct TimedRingBuffer<T, Time> {
    slots: Vec<Option<Slot<T, Time>>>,
    head: usize,
    tail: usize,
    len: usize,
    policy: OverwritePolicy,
    #[cfg(feature = "metrics")]
    metrics: TimedRingMetrics,
}

impl<T, Time> TimedRingBuffer<T, Time> {
    /// Creates an empty ring with the default [`OverwritePolicy::ReserveSlot`].
    ///
    /// Returns [`RingError::InvalidCapacity`] when `capacity` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    /// use timering::error::RingError;
    ///
    /// let ring = TimedRingBuffer::<i32, u64>::new(8).unwrap();
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), 8);
    /// assert_eq!(ring.live_limit(), 7);
    ///
    /// assert!(matches!(
    ///     TimedRingBuffer::<i32, u64>::new(0),
    ///     Err(RingError::InvalidCapacity { requested: 0 })
    /// ));
    /// ```
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        Self::with_policy(capacity, OverwritePolicy::default())
    }

    /// Creates an empty ring with an explicit overwrite policy.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::{OverwritePolicy, TimedRingBuffer};
    ///
    /// let mut ring =
    ///     TimedRingBuffer::<i32, u64>::with_policy(3, OverwritePolicy::FullCapacity).unwrap();
    /// for t in 0..5 {
    ///     ring.push_at(t as i32, t);
    /// }
    /// assert_eq!(ring.to_vec(), vec![2, 3, 4]);
    /// ```
    pub fn with_policy(capacity: usize, policy: OverwritePolicy) -> Result<Self, RingError> {
        if capacity == 0 {
            debug!(capacity, "rejecting timed ring with zero capacity");
            return Err(RingError::InvalidCapacity {
                requested: capacity,
            });
        }
        debug!(capacity, ?policy, "creating timed ring");
        Ok(Self::allocate(capacity, policy))
    }

    fn allocate(capacity: usize, policy: OverwritePolicy) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
            policy,
            #[cfg(feature = "metrics")]
            metrics: TimedRingMetrics::default(),
        }
    }

    /// Returns the number of slots allocated at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the maximum number of samples retained under the ring's policy.
    #[inline]
    pub fn live_limit(&self) -> usize {
        self.policy.live_limit(self.capacity())
    }

    /// Returns the overwrite policy chosen at construction.
    #[inline]
    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    /// Returns the number of live samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias for [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next push will evict the oldest sample.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.live_limit()
    }

    /// Appends a sample without a time.
    ///
    /// The slot is never matched by the time searches but is otherwise a normal
    /// member of the ring: it counts toward `len`, is returned by `get` and
    /// snapshots, and is evicted in order.
    pub fn push(&mut self, value: T) {
        #[cfg(feature = "metrics")]
        self.metrics.record_push_untimed();
        self.insert(Slot { value, time: None });
    }

    /// Appends a sample taken at `time`, evicting the oldest sample if the ring
    /// is at its live limit.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    ///
    /// let mut ring = TimedRingBuffer::<u8, u64>::new(4).unwrap();
    /// ring.push_at(1, 100);
    /// ring.push_at(2, 200);
    /// ring.push_at(3, 300);
    /// assert!(ring.is_full());
    ///
    /// ring.push_at(4, 400);
    /// assert_eq!(ring.to_vec(), vec![2, 3, 4]);
    /// ```
    pub fn push_at(&mut self, value: T, time: Time) {
        self.insert(Slot {
            value,
            time: Some(time),
        });
    }

    fn insert(&mut self, slot: Slot<T, Time>) {
        #[cfg(feature = "metrics")]
        self.metrics.record_push_call();

        let limit = self.live_limit();
        if limit == 0 {
            // a single reserved slot leaves no room for live samples
            trace!("timed ring retains no samples; dropping pushed sample");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            return;
        }
        if self.len == limit {
            self.take_front();
            trace!(head = self.head, len = self.len, "evicted oldest sample");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        self.slots[self.tail] = Some(slot);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
    }

    fn take_front(&mut self) -> Option<Slot<T, Time>> {
        if self.len == 0 {
            return None;
        }
        let slot = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        slot
    }

    /// Drops the oldest sample. Does nothing on an empty ring.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    ///
    /// let mut ring = TimedRingBuffer::<u8, u64>::new(4).unwrap();
    /// ring.pop_front();
    /// assert_eq!(ring.len(), 0);
    ///
    /// ring.push_at(1, 10);
    /// ring.push_at(2, 20);
    /// ring.pop_front();
    /// assert_eq!(ring.to_vec(), vec![2]);
    /// ```
    pub fn pop_front(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_front_call();
        if self.take_front().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_front_found();
        }
    }

    /// Drops every sample and resets the cursors. Capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    fn physical(&self, index: usize) -> Result<usize, RingError> {
        if self.len == 0 {
            return Err(RingError::EmptyBufferAccess);
        }
        if index >= self.len {
            return Err(RingError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok((self.head + index) % self.capacity())
    }

    fn live_slot(&self, index: usize) -> Result<&Slot<T, Time>, RingError> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_get_call();
        let slot = self
            .physical(index)
            .and_then(|phys| {
                self.slots[phys].as_ref().ok_or(RingError::OutOfRange {
                    index,
                    len: self.len,
                })
            });
        #[cfg(feature = "metrics")]
        if slot.is_err() {
            (&self.metrics).record_get_rejected();
        }
        slot
    }

    /// Returns the value at logical `index` (0 = oldest).
    ///
    /// Fails with [`RingError::EmptyBufferAccess`] on an empty ring and with
    /// [`RingError::OutOfRange`] when `index >= len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    /// use timering::error::RingError;
    ///
    /// let mut ring = TimedRingBuffer::<&str, u64>::new(4).unwrap();
    /// assert_eq!(ring.get(0), Err(RingError::EmptyBufferAccess));
    ///
    /// ring.push_at("x", 1);
    /// ring.push_at("y", 2);
    /// assert_eq!(ring.get(1), Ok(&"y"));
    /// assert_eq!(ring.get(2), Err(RingError::OutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, RingError> {
        self.live_slot(index).map(|slot| &slot.value)
    }

    /// Returns the time stored at logical `index`, `None` for untimed samples.
    pub fn time_at(&self, index: usize) -> Result<Option<&Time>, RingError> {
        self.live_slot(index).map(|slot| slot.time.as_ref())
    }

    /// Returns the value and time stored at logical `index`.
    pub fn sample(&self, index: usize) -> Result<(&T, Option<&Time>), RingError> {
        self.live_slot(index)
            .map(|slot| (&slot.value, slot.time.as_ref()))
    }

    /// Returns the oldest live value.
    pub fn get_head(&self) -> Result<&T, RingError> {
        self.get(0)
    }

    /// Returns the newest live value.
    pub fn get_newest(&self) -> Result<&T, RingError> {
        match self.len {
            0 => Err(RingError::EmptyBufferAccess),
            len => self.get(len - 1),
        }
    }

    /// Returns `true` if `physical_index` is the slot currently holding the
    /// oldest sample.
    #[inline]
    pub fn is_head(&self, physical_index: usize) -> bool {
        physical_index == self.head
    }

    /// Returns an iterator over `(value, time)` pairs from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, Time> {
        Iter {
            ring: self,
            front: 0,
            back: self.len,
        }
    }

    /// Returns an iterator over values from oldest to newest.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.iter().map(|(value, _)| value)
    }

    /// Returns borrowed references to every live value, oldest first.
    ///
    /// The references borrow the ring, so it cannot be mutated while they are
    /// held.
    pub fn to_ref_vec(&self) -> Vec<&T> {
        self.values().collect()
    }

    /// Returns an approximate memory footprint in bytes.
    ///
    /// Constant for a given capacity; heap owned by `T` itself is not counted.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.slots.capacity() * std::mem::size_of::<Option<Slot<T, Time>>>()
    }

    /// Verifies cursor arithmetic and slot occupancy.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let capacity = self.capacity();
        if capacity == 0 {
            return Err(InvariantError::new("ring has no slots"));
        }
        if self.len > self.live_limit() {
            return Err(InvariantError::new(format!(
                "len {} exceeds live limit {}",
                self.len,
                self.live_limit()
            )));
        }
        if self.head >= capacity || self.tail >= capacity {
            return Err(InvariantError::new(format!(
                "cursor out of bounds: head={} tail={} capacity={}",
                self.head, self.tail, capacity
            )));
        }
        if self.tail != (self.head + self.len) % capacity {
            return Err(InvariantError::new(format!(
                "tail {} != (head {} + len {}) % {}",
                self.tail, self.head, self.len, capacity
            )));
        }
        for (phys, slot) in self.slots.iter().enumerate() {
            let live = (phys + capacity - self.head) % capacity < self.len;
            if live != slot.is_some() {
                return Err(InvariantError::new(format!(
                    "slot {} occupancy {} does not match liveness {}",
                    phys,
                    slot.is_some(),
                    live
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("timed ring invariant violated: {err}");
        }
    }
}

impl<T: Clone, Time> TimedRingBuffer<T, Time> {
    /// Returns an owned copy of every live value, oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    ///
    /// let mut ring = TimedRingBuffer::<String, u64>::new(3).unwrap();
    /// ring.push_at("a".into(), 1);
    /// ring.push_at("b".into(), 2);
    /// let snapshot = ring.to_vec();
    /// ring.clear();
    /// assert_eq!(snapshot, vec!["a".to_string(), "b".to_string()]);
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

impl<T, Time: Timestamp> TimedRingBuffer<T, Time> {
    /// Returns the logical index of the sample nearest to `time`, provided its
    /// distance is strictly less than `epsilon`.
    ///
    /// Among equally near samples the oldest wins. A non-positive `epsilon`
    /// never matches.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    ///
    /// let mut ring = TimedRingBuffer::<&str, i64>::new(8).unwrap();
    /// ring.push_at("early", 10);
    /// ring.push_at("late", 20);
    ///
    /// // 15 is equidistant: the older sample wins
    /// assert_eq!(ring.find_closest(&15, 6), Some(0));
    /// // distance must be strictly below epsilon
    /// assert_eq!(ring.find_closest(&15, 5), None);
    /// ```
    pub fn find_closest(&self, time: &Time, epsilon: Time::Distance) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_find_closest_call();
        let found = self.nearest_where(time, epsilon, |_| true);
        self.record_search_outcome(found)
    }

    /// Like [`find_closest`](Self::find_closest) but only considers samples
    /// whose time is strictly less than `time`.
    ///
    /// # Example
    ///
    /// ```
    /// use timering::ds::TimedRingBuffer;
    ///
    /// let mut ring = TimedRingBuffer::<&str, u64>::new(8).unwrap();
    /// ring.push_at("a", 100);
    /// ring.push_at("b", 200);
    ///
    /// // "b" sits exactly at the query time and is not "preceding"
    /// assert_eq!(ring.find_closest_preceding(&200, 500), Some(0));
    /// assert_eq!(ring.find_closest_preceding(&100, 500), None);
    /// ```
    pub fn find_closest_preceding(&self, time: &Time, epsilon: Time::Distance) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_find_preceding_call();
        let found = self.nearest_where(time, epsilon, |stored| stored < time);
        self.record_search_outcome(found)
    }

    /// Returns the logical index of the oldest sample whose time equals `time`.
    pub fn find_exact(&self, time: &Time) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_find_exact_call();
        let found = self.iter().position(|(_, stored)| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_search_scan_step();
            stored == Some(time)
        });
        self.record_search_outcome(found)
    }

    // Candidates at or beyond `epsilon` are never recorded, so the running best
    // is always a real distance below the threshold and needs no sentinel.
    fn nearest_where<F>(&self, time: &Time, epsilon: Time::Distance, accept: F) -> Option<usize>
    where
        F: Fn(&Time) -> bool,
    {
        let mut best: Option<(usize, Time::Distance)> = None;
        for (index, (_, stored)) in self.iter().enumerate() {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_search_scan_step();
            let Some(stored) = stored else {
                continue;
            };
            if !accept(stored) {
                continue;
            }
            let distance = stored.distance(time);
            let closer = match best {
                None => distance < epsilon,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    #[inline]
    fn record_search_outcome(&self, found: Option<usize>) -> Option<usize> {
        #[cfg(feature = "metrics")]
        match found {
            Some(_) => (&self.metrics).record_search_hit(),
            None => (&self.metrics).record_search_miss(),
        }
        found
    }
}

impl<T, Time> Default for TimedRingBuffer<T, Time> {
    fn default() -> Self {
        Self::allocate(DEFAULT_CAPACITY, OverwritePolicy::default())
    }
}

impl<T: Clone, Time: Clone> Clone for TimedRingBuffer<T, Time> {
    /// Clones the samples and cursors. Metrics start from zero in the clone.
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
            policy: self.policy,
            #[cfg(feature = "metrics")]
            metrics: TimedRingMetrics::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// PartialEq: compare logical content, not the raw slot layout
// ---------------------------------------------------------------------------

impl<T: PartialEq, Time: PartialEq> PartialEq for TimedRingBuffer<T, Time> {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity()
            && self.policy == other.policy
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq, Time: Eq> Eq for TimedRingBuffer<T, Time> {}

impl<T, Time> Extend<(T, Time)> for TimedRingBuffer<T, Time> {
    fn extend<I: IntoIterator<Item = (T, Time)>>(&mut self, iter: I) {
        for (value, time) in iter {
            self.push_at(value, time);
        }
    }
}

#[cfg(feature = "metrics")]
impl<T, Time> TimedRingBuffer<T, Time> {
    pub fn metrics_snapshot(&self) -> TimedRingMetricsSnapshot {
        self.metrics
            .snapshot(self.len, self.live_limit(), self.capacity())
    }
}

#[cfg(feature = "metrics")]
impl<T, Time> MetricsSnapshotProvider<TimedRingMetricsSnapshot> for TimedRingBuffer<T, Time> {
    fn snapshot(&self) -> TimedRingMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<T, Time> MetricsReset for TimedRingBuffer<T, Time> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

// ---------------------------------------------------------------------------
// Iterator types
// ---------------------------------------------------------------------------

/// Borrowed iterator over `(value, time)` pairs in a [`TimedRingBuffer`],
/// from oldest to newest.
///
/// Created by [`TimedRingBuffer::iter`].
#[derive(Debug)]
pub struct Iter<'a, T, Time> {
    ring: &'a TimedRingBuffer<T, Time>,
    front: usize, // logical, inclusive
    back: usize,  // logical, exclusive
}

impl<T, Time> Clone for Iter<'_, T, Time> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T, Time> Iter<'a, T, Time> {
    fn slot_at(&self, logical: usize) -> Option<(&'a T, Option<&'a Time>)> {
        let ring = self.ring;
        let phys = (ring.head + logical) % ring.capacity();
        ring.slots[phys]
            .as_ref()
            .map(|slot| (&slot.value, slot.time.as_ref()))
    }
}

impl<'a, T, Time> Iterator for Iter<'a, T, Time> {
    type Item = (&'a T, Option<&'a Time>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.slot_at(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, Time> DoubleEndedIterator for Iter<'_, T, Time> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.slot_at(self.back)
    }
}

impl<T, Time> ExactSizeIterator for Iter<'_, T, Time> {}

impl<T, Time> FusedIterator for Iter<'_, T, Time> {}

/// Owning iterator over `(value, time)` pairs, from oldest to newest.
///
/// Created by calling [`IntoIterator::into_iter`] on a `TimedRingBuffer`.
#[derive(Debug)]
pub struct IntoIter<T, Time> {
    ring: TimedRingBuffer<T, Time>,
}

impl<T, Time> Iterator for IntoIter<T, Time> {
    type Item = (T, Option<Time>);

    fn next(&mut self) -> Option<Self::Item> {
        self.ring
            .take_front()
            .map(|slot| (slot.value, slot.time))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len, Some(self.ring.len))
    }
}

impl<T, Time> ExactSizeIterator for IntoIter<T, Time> {}

impl<T, Time> IntoIterator for TimedRingBuffer<T, Time> {
    type Item = (T, Option<Time>);
    type IntoIter = IntoIter<T, Time>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a, T, Time> IntoIterator for &'a TimedRingBuffer<T, Time> {
    type Item = (&'a T, Option<&'a Time>);
    type IntoIter = Iter<'a, T, Time>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentTimedRing
// ---------------------------------------------------------------------------

/// Thread-safe wrapper around [`TimedRingBuffer`] using a `parking_lot::RwLock`.
///
/// Mutations take the write lock; searches and reads share the read lock.
/// Logical indices are meaningless once the lock is released, so the search
/// methods here return cloned samples instead of indices.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use std::sync::Arc;
/// use std::thread;
///
/// use timering::ds::ConcurrentTimedRing;
///
/// let ring = Arc::new(ConcurrentTimedRing::<u32, u64>::new(128).unwrap());
/// let writer = {
///     let ring = Arc::clone(&ring);
///     thread::spawn(move || {
///         for t in 0..100 {
///             ring.push_at(t as u32, t);
///         }
///     })
/// };
/// writer.join().unwrap();
/// assert_eq!(ring.closest(&42, 1), Some(42));
/// # }
/// ```
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentTimedRing<T, Time> {
    inner: RwLock<TimedRingBuffer<T, Time>>,
}

#[cfg(feature = "concurrency")]
impl<T, Time> ConcurrentTimedRing<T, Time> {
    /// Creates an empty ring with the default overwrite policy.
    pub fn new(capacity: usize) -> Result<Self, RingError> {
        TimedRingBuffer::new(capacity).map(Self::from_ring)
    }

    /// Creates an empty ring with an explicit overwrite policy.
    pub fn with_policy(capacity: usize, policy: OverwritePolicy) -> Result<Self, RingError> {
        TimedRingBuffer::with_policy(capacity, policy).map(Self::from_ring)
    }

    /// Wraps an existing ring.
    pub fn from_ring(ring: TimedRingBuffer<T, Time>) -> Self {
        Self {
            inner: RwLock::new(ring),
        }
    }

    /// Unwraps the inner ring.
    pub fn into_inner(self) -> TimedRingBuffer<T, Time> {
        self.inner.into_inner()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Appends an untimed sample.
    pub fn push(&self, value: T) {
        self.inner.write().push(value);
    }

    /// Appends a sample taken at `time`.
    pub fn push_at(&self, value: T, time: Time) {
        self.inner.write().push_at(value, time);
    }

    /// Appends a sample without blocking; hands the sample back on contention.
    pub fn try_push_at(&self, value: T, time: Time) -> Result<(), (T, Time)> {
        match self.inner.try_write() {
            Some(mut ring) => {
                ring.push_at(value, time);
                Ok(())
            },
            None => Err((value, time)),
        }
    }

    /// Drops the oldest sample.
    pub fn pop_front(&self) {
        self.inner.write().pop_front();
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` against the ring under the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&TimedRingBuffer<T, Time>) -> R) -> R {
        let ring = self.inner.read();
        f(&ring)
    }

    /// Runs `f` against the ring under the write lock.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut TimedRingBuffer<T, Time>) -> R) -> R {
        let mut ring = self.inner.write();
        f(&mut ring)
    }
}

#[cfg(feature = "concurrency")]
impl<T: Clone, Time> ConcurrentTimedRing<T, Time> {
    /// Returns a clone of the value at logical `index`.
    pub fn get_cloned(&self, index: usize) -> Result<T, RingError> {
        self.inner.read().get(index).cloned()
    }

    /// Returns a clone of the oldest value.
    pub fn head_cloned(&self) -> Result<T, RingError> {
        self.inner.read().get_head().cloned()
    }

    /// Returns an owned snapshot, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.read().to_vec()
    }
}

#[cfg(feature = "concurrency")]
impl<T: Clone, Time: Timestamp> ConcurrentTimedRing<T, Time> {
    /// Clone of the sample nearest `time` within `epsilon`.
    pub fn closest(&self, time: &Time, epsilon: Time::Distance) -> Option<T> {
        let ring = self.inner.read();
        let index = ring.find_closest(time, epsilon)?;
        ring.get(index).ok().cloned()
    }

    /// Clone of the nearest sample strictly before `time` within `epsilon`.
    pub fn closest_preceding(&self, time: &Time, epsilon: Time::Distance) -> Option<T> {
        let ring = self.inner.read();
        let index = ring.find_closest_preceding(time, epsilon)?;
        ring.get(index).ok().cloned()
    }

    /// Clone of the oldest sample taken exactly at `time`.
    pub fn exact(&self, time: &Time) -> Option<T> {
        let ring = self.inner.read();
        let index = ring.find_exact(time)?;
        ring.get(index).ok().cloned()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl<T, Time> MetricsSnapshotProvider<TimedRingMetricsSnapshot> for ConcurrentTimedRing<T, Time> {
    fn snapshot(&self) -> TimedRingMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(capacity: usize) -> TimedRingBuffer<char, u64> {
        TimedRingBuffer::new(capacity).unwrap()
    }

    fn full_ring(capacity: usize) -> TimedRingBuffer<char, u64> {
        TimedRingBuffer::with_policy(capacity, OverwritePolicy::FullCapacity).unwrap()
    }

    // ==============================================
    // Construction
    // ==============================================

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(
            TimedRingBuffer::<u8, u64>::new(0).unwrap_err(),
            RingError::InvalidCapacity { requested: 0 }
        );
        assert!(TimedRingBuffer::<u8, u64>::with_policy(0, OverwritePolicy::FullCapacity).is_err());
    }

    #[test]
    fn new_ring_is_empty() {
        let r = ring(4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.size(), 0);
        assert_eq!(r.capacity(), 4);
        assert_eq!(r.live_limit(), 3);
        assert_eq!(r.policy(), OverwritePolicy::ReserveSlot);
        r.debug_validate_invariants();
    }

    #[test]
    fn default_uses_default_capacity() {
        let r = TimedRingBuffer::<u8, u64>::default();
        assert_eq!(r.capacity(), DEFAULT_CAPACITY);
        assert_eq!(r.policy(), OverwritePolicy::ReserveSlot);
    }

    // ==============================================
    // Insert and eviction
    // ==============================================

    #[test]
    fn pushes_below_limit_keep_insertion_order() {
        let mut r = ring(5);
        for (i, c) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            r.push_at(c, i as u64);
            assert_eq!(r.len(), i + 1);
        }
        assert_eq!(r.to_vec(), vec!['a', 'b', 'c', 'd']);
        r.debug_validate_invariants();
    }

    #[test]
    fn capacity_three_keeps_two_samples() {
        let mut r = ring(3);
        r.push_at('A', 1);
        r.push_at('B', 2);
        r.push_at('C', 3);
        r.push_at('D', 4);
        assert_eq!(r.to_vec(), vec!['C', 'D']);
        assert_eq!(r.size(), 2);
        r.debug_validate_invariants();
    }

    #[test]
    fn overflow_keeps_last_capacity_minus_one() {
        let mut r = TimedRingBuffer::<u32, u32>::new(4).unwrap();
        for t in 0..11 {
            r.push_at(t, t);
        }
        assert_eq!(r.to_vec(), vec![8, 9, 10]);
        r.debug_validate_invariants();
    }

    #[test]
    fn full_capacity_policy_uses_every_slot() {
        let mut r = full_ring(3);
        r.push_at('A', 1);
        r.push_at('B', 2);
        r.push_at('C', 3);
        assert!(r.is_full());
        assert_eq!(r.to_vec(), vec!['A', 'B', 'C']);
        r.push_at('D', 4);
        assert_eq!(r.to_vec(), vec!['B', 'C', 'D']);
        r.debug_validate_invariants();
    }

    #[test]
    fn capacity_one_reserve_slot_retains_nothing() {
        let mut r = ring(1);
        r.push_at('A', 1);
        r.push_at('B', 2);
        assert!(r.is_empty());
        assert_eq!(r.get_head(), Err(RingError::EmptyBufferAccess));
        r.debug_validate_invariants();
    }

    #[test]
    fn capacity_one_full_capacity_holds_latest() {
        let mut r = full_ring(1);
        r.push_at('A', 1);
        r.push_at('B', 2);
        assert_eq!(r.to_vec(), vec!['B']);
        r.debug_validate_invariants();
    }

    #[test]
    fn evicted_values_are_dropped() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut r = TimedRingBuffer::<Rc<()>, u64>::new(3).unwrap();
        for t in 0..5 {
            r.push_at(Rc::clone(&tracker), t);
        }
        // two live clones plus the original
        assert_eq!(Rc::strong_count(&tracker), 3);
        r.pop_front();
        assert_eq!(Rc::strong_count(&tracker), 2);
        r.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    // ==============================================
    // Pop / clear
    // ==============================================

    #[test]
    fn pop_front_on_empty_is_noop() {
        let mut r = ring(3);
        r.pop_front();
        assert_eq!(r.len(), 0);
        r.debug_validate_invariants();
    }

    #[test]
    fn pop_front_removes_oldest() {
        let mut r = ring(4);
        r.push_at('a', 1);
        r.push_at('b', 2);
        r.pop_front();
        assert_eq!(r.to_vec(), vec!['b']);
        assert_eq!(r.get_head(), Ok(&'b'));
        r.debug_validate_invariants();
    }

    #[test]
    fn pop_front_frees_room_before_eviction() {
        let mut r = ring(3);
        r.push_at('a', 1);
        r.push_at('b', 2);
        r.pop_front();
        r.push_at('c', 3);
        assert_eq!(r.to_vec(), vec!['b', 'c']);
        r.push_at('d', 4);
        assert_eq!(r.to_vec(), vec!['c', 'd']);
        r.debug_validate_invariants();
    }

    #[test]
    fn clear_resets_and_ring_stays_usable() {
        let mut r = ring(3);
        r.push_at('a', 1);
        r.push_at('b', 2);
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.find_exact(&1), None);
        r.push_at('z', 9);
        assert_eq!(r.to_vec(), vec!['z']);
        r.debug_validate_invariants();
    }

    // ==============================================
    // Random access
    // ==============================================

    #[test]
    fn get_maps_logical_indices_after_wrap() {
        let mut r = ring(4);
        for (t, c) in ['a', 'b', 'c', 'd', 'e'].into_iter().enumerate() {
            r.push_at(c, t as u64);
        }
        assert_eq!(r.get(0), Ok(&'c'));
        assert_eq!(r.get(1), Ok(&'d'));
        assert_eq!(r.get(2), Ok(&'e'));
        assert_eq!(r.time_at(2), Ok(Some(&4)));
        assert_eq!(r.sample(0), Ok((&'c', Some(&2))));
    }

    #[test]
    fn get_rejects_indices_past_len_and_capacity() {
        let mut r = ring(4);
        r.push_at('a', 1);
        assert_eq!(r.get(1), Err(RingError::OutOfRange { index: 1, len: 1 }));
        assert_eq!(r.get(4), Err(RingError::OutOfRange { index: 4, len: 1 }));
        assert_eq!(
            r.get(usize::MAX),
            Err(RingError::OutOfRange {
                index: usize::MAX,
                len: 1
            })
        );
    }

    #[test]
    fn empty_ring_access_is_an_error() {
        let r = ring(4);
        assert_eq!(r.get(0), Err(RingError::EmptyBufferAccess));
        assert_eq!(r.get_head(), Err(RingError::EmptyBufferAccess));
        assert_eq!(r.get_newest(), Err(RingError::EmptyBufferAccess));
        assert_eq!(r.time_at(0), Err(RingError::EmptyBufferAccess));
    }

    #[test]
    fn head_and_newest() {
        let mut r = ring(3);
        for (t, c) in ['a', 'b', 'c'].into_iter().enumerate() {
            r.push_at(c, t as u64);
        }
        assert_eq!(r.get_head(), Ok(&'b'));
        assert_eq!(r.get_newest(), Ok(&'c'));
    }

    #[test]
    fn is_head_tracks_physical_slot() {
        let mut r = ring(3);
        assert!(r.is_head(0));
        r.push_at('a', 1);
        r.push_at('b', 2);
        r.push_at('c', 3);
        // 'a' evicted, head moved to physical slot 1
        assert!(!r.is_head(0));
        assert!(r.is_head(1));
    }

    // ==============================================
    // Searches
    // ==============================================

    #[test]
    fn find_closest_scenario() {
        let mut r = TimedRingBuffer::<u8, f64>::new(5).unwrap();
        for t in 1..=4 {
            r.push_at(t as u8, f64::from(t));
        }
        let idx = r.find_closest(&3.1, 0.5).unwrap();
        assert_eq!(r.time_at(idx), Ok(Some(&3.0)));
        assert_eq!(r.find_closest(&10.0, 0.5), None);
    }

    #[test]
    fn find_closest_non_positive_epsilon_never_matches() {
        let mut r = TimedRingBuffer::<u8, f64>::new(5).unwrap();
        r.push_at(1, 1.0);
        assert_eq!(r.find_closest(&1.0, 0.0), None);
        assert_eq!(r.find_closest(&1.0, -1.0), None);

        let mut ints = ring(3);
        ints.push_at('a', 7);
        assert_eq!(ints.find_closest(&7, 0), None);
        assert_eq!(ints.find_closest(&7, 1), Some(0));
    }

    #[test]
    fn find_closest_tie_prefers_oldest() {
        let mut r = ring(8);
        r.push_at('a', 10);
        r.push_at('b', 30);
        r.push_at('c', 10);
        assert_eq!(r.find_closest(&20, 100), Some(0));
        assert_eq!(r.find_closest(&10, 1), Some(0));
    }

    #[test]
    fn find_closest_after_wrap_returns_logical_index() {
        let mut r = ring(4);
        for t in 0..7_u64 {
            r.push_at(char::from(b'a' + t as u8), t * 10);
        }
        // live: e(40) f(50) g(60)
        assert_eq!(r.find_closest(&52, 5), Some(1));
        assert_eq!(r.get(1), Ok(&'f'));
    }

    #[test]
    fn find_closest_preceding_excludes_equal_and_later() {
        let mut r = ring(8);
        r.push_at('a', 10);
        r.push_at('b', 19);
        r.push_at('c', 20);
        r.push_at('d', 21);
        let idx = r.find_closest_preceding(&20, 100).unwrap();
        assert_eq!(r.get(idx), Ok(&'b'));
        assert_eq!(r.find_closest_preceding(&10, 100), None);
        assert_eq!(r.find_closest_preceding(&20, 1), None);
    }

    #[test]
    fn find_closest_preceding_ignores_sentinel_thresholds() {
        // gaps far larger than any fixed magic bound still resolve
        let mut r = ring(4);
        r.push_at('a', 0);
        r.push_at('b', 5_000_000);
        assert_eq!(r.find_closest_preceding(&u64::MAX, u64::MAX), Some(1));
    }

    #[test]
    fn find_exact_returns_oldest_match() {
        let mut r = ring(8);
        r.push_at('a', 5);
        r.push_at('b', 6);
        r.push_at('c', 5);
        assert_eq!(r.find_exact(&5), Some(0));
        assert_eq!(r.find_exact(&6), Some(1));
        assert_eq!(r.find_exact(&7), None);
    }

    #[test]
    fn find_exact_none_when_empty_or_evicted() {
        let mut r = ring(3);
        assert_eq!(r.find_exact(&1), None);
        r.push_at('a', 1);
        assert_eq!(r.find_exact(&1), Some(0));
        r.push_at('b', 2);
        r.push_at('c', 3);
        assert_eq!(r.find_exact(&1), None);
    }

    #[test]
    fn untimed_samples_are_invisible_to_search() {
        let mut r = ring(4);
        r.push('x');
        r.push_at('a', 10);
        r.push('y');
        assert_eq!(r.len(), 3);
        assert_eq!(r.find_closest(&0, 100), Some(1));
        assert_eq!(r.find_exact(&10), Some(1));
        assert_eq!(r.time_at(0), Ok(None));
        assert_eq!(r.to_vec(), vec!['x', 'a', 'y']);
    }

    #[test]
    fn nan_times_never_match() {
        let mut r = TimedRingBuffer::<u8, f32>::new(4).unwrap();
        r.push_at(0, f32::NAN);
        r.push_at(1, 2.0);
        assert_eq!(r.find_closest(&2.0, 1.0), Some(1));
        assert_eq!(r.find_closest(&f32::NAN, f32::INFINITY), None);
    }

    // ==============================================
    // Snapshots and iteration
    // ==============================================

    #[test]
    fn to_ref_vec_borrows_storage() {
        let mut r = TimedRingBuffer::<String, u64>::new(4).unwrap();
        r.push_at("a".to_string(), 1);
        r.push_at("b".to_string(), 2);
        let refs = r.to_ref_vec();
        assert_eq!(refs, vec!["a", "b"]);
        assert!(std::ptr::eq(refs[0], r.get(0).unwrap()));
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut r = ring(5);
        for (t, c) in ['a', 'b', 'c', 'd', 'e', 'f'].into_iter().enumerate() {
            r.push_at(c, t as u64);
        }
        let mut it = r.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some((&'c', Some(&2))));
        assert_eq!(it.next_back(), Some((&'f', Some(&5))));
        assert_eq!(it.len(), 2);
        let rest: Vec<_> = it.map(|(v, _)| *v).collect();
        assert_eq!(rest, vec!['d', 'e']);
    }

    #[test]
    fn into_iter_yields_owned_samples() {
        let mut r = ring(3);
        r.push_at('a', 1);
        r.push('b');
        let items: Vec<_> = r.into_iter().collect();
        assert_eq!(items, vec![('a', Some(1)), ('b', None)]);
    }

    #[test]
    fn ref_into_iter_for_loop() {
        let mut r = ring(3);
        r.push_at('a', 1);
        r.push_at('b', 2);
        let mut seen = Vec::new();
        for (value, time) in &r {
            seen.push((*value, time.copied()));
        }
        assert_eq!(seen, vec![('a', Some(1)), ('b', Some(2))]);
    }

    #[test]
    fn extend_pushes_timed_samples() {
        let mut r = ring(4);
        r.extend([('a', 1), ('b', 2), ('c', 3), ('d', 4)]);
        assert_eq!(r.to_vec(), vec!['b', 'c', 'd']);
    }

    // ==============================================
    // Equality, clone, footprint
    // ==============================================

    #[test]
    fn eq_ignores_physical_layout() {
        let mut a = ring(4);
        let mut b = ring(4);
        a.extend([('x', 0), ('y', 1), ('z', 2)]);
        b.extend([('q', 9), ('x', 0), ('y', 1), ('z', 2)]);
        assert_ne!(a.head, b.head);
        assert_eq!(a, b);
    }

    #[test]
    fn ne_different_capacity_or_policy() {
        assert_ne!(ring(4), ring(5));
        assert_ne!(ring(4), full_ring(4));
    }

    #[test]
    fn clone_is_independent() {
        let mut a = ring(4);
        a.push_at('a', 1);
        let mut b = a.clone();
        b.push_at('b', 2);
        assert_eq!(a.to_vec(), vec!['a']);
        assert_eq!(b.to_vec(), vec!['a', 'b']);
        b.debug_validate_invariants();
    }

    #[test]
    fn approx_bytes_scales_with_capacity() {
        let small = TimedRingBuffer::<u64, u64>::new(4).unwrap();
        let large = TimedRingBuffer::<u64, u64>::new(400).unwrap();
        assert!(large.approx_bytes() > small.approx_bytes());
        assert!(large.approx_bytes() >= 400 * 2 * std::mem::size_of::<u64>());
    }

    #[test]
    fn check_invariants_reports_corruption() {
        let mut r = ring(4);
        r.push_at('a', 1);
        r.tail = 3;
        let err = r.check_invariants().unwrap_err();
        assert!(err.message().contains("tail"));
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counts_pushes_evictions_and_searches() {
            let mut r = ring(3);
            r.push_at('a', 1);
            r.push_at('b', 2);
            r.push_at('c', 3);
            r.push('d');
            r.pop_front();
            r.pop_front();
            r.pop_front();
            assert_eq!(r.find_exact(&3), None);
            r.push_at('e', 5);
            assert_eq!(r.find_closest(&5, 1), Some(0));
            let _ = r.get(9);

            let snap = r.metrics_snapshot();
            assert_eq!(snap.push_calls, 5);
            assert_eq!(snap.push_untimed, 1);
            assert_eq!(snap.evicted_entries, 2);
            assert_eq!(snap.pop_front_calls, 3);
            assert_eq!(snap.pop_front_found, 2);
            assert_eq!(snap.find_exact_calls, 1);
            assert_eq!(snap.find_closest_calls, 1);
            assert_eq!(snap.search_hits, 1);
            assert_eq!(snap.search_misses, 1);
            assert_eq!(snap.search_scan_steps, 1);
            assert_eq!(snap.get_calls, 1);
            assert_eq!(snap.get_rejected, 1);
            assert_eq!((snap.len, snap.live_limit, snap.capacity), (1, 2, 3));
        }

        #[test]
        fn reset_zeroes_counters() {
            let mut r = ring(3);
            r.push_at('a', 1);
            r.reset_metrics();
            let snap = r.snapshot();
            assert_eq!(snap.push_calls, 0);
            assert_eq!(snap.len, 1);
        }
    }
}
