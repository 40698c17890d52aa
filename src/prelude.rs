pub use crate::builder::TimedRingBuilder;
#[cfg(feature = "concurrency")]
pub use crate::ds::ConcurrentTimedRing;
pub use crate::ds::{OverwritePolicy, TimedRingBuffer};
pub use crate::error::RingError;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TimedRingMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::time::Timestamp;
