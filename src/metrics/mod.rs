//! Optional operation counters for [`TimedRingBuffer`](crate::ds::TimedRingBuffer).
//!
//! Enabled by the `metrics` feature. Rings record into an embedded
//! [`TimedRingMetrics`](metrics_impl::TimedRingMetrics); callers read a
//! [`TimedRingMetricsSnapshot`](snapshot::TimedRingMetricsSnapshot) and hand it
//! to an exporter.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
