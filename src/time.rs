//! Timestamp abstraction used by the time-indexed searches.
//!
//! A [`TimedRingBuffer`](crate::ds::TimedRingBuffer) is generic over its time
//! type. Searches need two things from it: an ordering (for "strictly before"
//! queries) and a non-negative distance between two instants that can be
//! compared against a caller supplied threshold.
//!
//! | Time type          | `Distance` | Notes                                  |
//! |--------------------|------------|----------------------------------------|
//! | `u8` .. `u128`     | same type  | `abs_diff`                             |
//! | `i8` .. `i128`     | unsigned   | `abs_diff`, never overflows            |
//! | `f32`, `f64`       | same type  | `(a - b).abs()`; NaN never matches     |
//! | `Duration`         | `Duration` | offsets from an arbitrary epoch        |
//! | `Instant`          | `Duration` | monotonic clock samples                |
//! | `SystemTime`       | `Duration` | wall clock samples                     |
//!
//! ## Example
//!
//! ```
//! use timering::time::Timestamp;
//!
//! assert_eq!(10_i64.distance(&-5), 15_u64);
//! assert_eq!(3.5_f64.distance(&4.0), 0.5);
//! ```

use std::time::{Duration, Instant, SystemTime};

/// A point in time that can be searched by distance.
///
/// `distance` must be symmetric and zero for equal instants. The distance type
/// only needs a partial order so floating point clocks work; a NaN distance
/// compares false against everything and is therefore never selected.
pub trait Timestamp: PartialOrd {
    /// Magnitude of the gap between two instants.
    type Distance: PartialOrd + Copy;

    /// Returns `|self - other|`.
    fn distance(&self, other: &Self) -> Self::Distance;
}

macro_rules! impl_timestamp_int {
    ($($t:ty => $d:ty),* $(,)?) => {
        $(
            impl Timestamp for $t {
                type Distance = $d;

                #[inline]
                fn distance(&self, other: &Self) -> $d {
                    self.abs_diff(*other)
                }
            }
        )*
    };
}

impl_timestamp_int! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
}

macro_rules! impl_timestamp_float {
    ($($t:ty),*) => {
        $(
            impl Timestamp for $t {
                type Distance = $t;

                #[inline]
                fn distance(&self, other: &Self) -> $t {
                    (*self - *other).abs()
                }
            }
        )*
    };
}

impl_timestamp_float!(f32, f64);

impl Timestamp for Duration {
    type Distance = Duration;

    #[inline]
    fn distance(&self, other: &Self) -> Duration {
        if self >= other {
            *self - *other
        } else {
            *other - *self
        }
    }
}

impl Timestamp for Instant {
    type Distance = Duration;

    #[inline]
    fn distance(&self, other: &Self) -> Duration {
        if self >= other {
            self.duration_since(*other)
        } else {
            other.duration_since(*self)
        }
    }
}

impl Timestamp for SystemTime {
    type Distance = Duration;

    #[inline]
    fn distance(&self, other: &Self) -> Duration {
        match self.duration_since(*other) {
            Ok(d) => d,
            Err(err) => err.duration(),
        }
    }
}
