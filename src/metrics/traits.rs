//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* into small traits so
//! monitoring and bench/testing never couple to ring logic.
//!
//! ```text
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ RingMetricsRecorder          │    │ RingMetricsReadRecorder      │
//!   │ push/evict/pop_front/clear   │    │ searches and random access   │
//!   │ (&mut self paths)            │    │ (&self paths, MetricsCell)   │
//!   └──────────────┬───────────────┘    └──────────────┬───────────────┘
//!                  └──────────────┬────────────────────┘
//!                                 ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │───▶│ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for operations that mutate the ring.
pub trait RingMetricsRecorder {
    fn record_push_call(&mut self);
    fn record_push_untimed(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_pop_front_call(&mut self);
    fn record_pop_front_found(&mut self);
    fn record_clear(&mut self);
}

/// Counters for `&self` operations (uses interior mutability).
pub trait RingMetricsReadRecorder {
    fn record_find_closest_call(&self);
    fn record_find_preceding_call(&self);
    fn record_find_exact_call(&self);
    fn record_search_hit(&self);
    fn record_search_miss(&self);
    fn record_search_scan_step(&self);
    fn record_get_call(&self);
    fn record_get_rejected(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
