//! timering: a fixed-capacity ring of timestamped samples with nearest-time lookup.
//!
//! Keeps the most recent samples of a time series and answers "which stored
//! sample is closest to this time?" without ever interpolating.
//!
//! ```
//! use timering::prelude::*;
//!
//! let mut ring = TimedRingBuilder::new(16)
//!     .policy(OverwritePolicy::FullCapacity)
//!     .build::<f32, u64>()
//!     .unwrap();
//!
//! ring.push_at(20.5, 1_000);
//! ring.push_at(21.0, 2_000);
//!
//! let idx = ring.find_closest(&1_900, 250).unwrap();
//! assert_eq!(ring.get(idx), Ok(&21.0));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod time;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
