use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::TimedRingMetricsSnapshot;
use crate::metrics::traits::{RingMetricsReadRecorder, RingMetricsRecorder};

/// Counters embedded in a [`TimedRingBuffer`](crate::ds::TimedRingBuffer).
///
/// Mutating paths bump plain `u64`s; `&self` paths go through [`MetricsCell`].
#[derive(Debug, Default)]
pub struct TimedRingMetrics {
    pub push_calls: u64,
    pub push_untimed: u64,
    pub evicted_entries: u64,
    pub pop_front_calls: u64,
    pub pop_front_found: u64,
    pub clear_calls: u64,
    pub find_closest_calls: MetricsCell,
    pub find_preceding_calls: MetricsCell,
    pub find_exact_calls: MetricsCell,
    pub search_hits: MetricsCell,
    pub search_misses: MetricsCell,
    pub search_scan_steps: MetricsCell,
    pub get_calls: MetricsCell,
    pub get_rejected: MetricsCell,
}

impl TimedRingMetrics {
    pub fn new() -> TimedRingMetrics {
        TimedRingMetrics::default()
    }

    /// Copies the counters and attaches the supplied gauges.
    pub fn snapshot(
        &self,
        len: usize,
        live_limit: usize,
        capacity: usize,
    ) -> TimedRingMetricsSnapshot {
        TimedRingMetricsSnapshot {
            push_calls: self.push_calls,
            push_untimed: self.push_untimed,
            evicted_entries: self.evicted_entries,
            pop_front_calls: self.pop_front_calls,
            pop_front_found: self.pop_front_found,
            clear_calls: self.clear_calls,
            find_closest_calls: self.find_closest_calls.get(),
            find_preceding_calls: self.find_preceding_calls.get(),
            find_exact_calls: self.find_exact_calls.get(),
            search_hits: self.search_hits.get(),
            search_misses: self.search_misses.get(),
            search_scan_steps: self.search_scan_steps.get(),
            get_calls: self.get_calls.get(),
            get_rejected: self.get_rejected.get(),
            len,
            live_limit,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = TimedRingMetrics::default();
    }
}

impl RingMetricsRecorder for TimedRingMetrics {
    fn record_push_call(&mut self) {
        self.push_calls += 1;
    }

    fn record_push_untimed(&mut self) {
        self.push_untimed += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_pop_front_call(&mut self) {
        self.pop_front_calls += 1;
    }

    fn record_pop_front_found(&mut self) {
        self.pop_front_found += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl RingMetricsReadRecorder for &TimedRingMetrics {
    fn record_find_closest_call(&self) {
        self.find_closest_calls.incr();
    }

    fn record_find_preceding_call(&self) {
        self.find_preceding_calls.incr();
    }

    fn record_find_exact_call(&self) {
        self.find_exact_calls.incr();
    }

    fn record_search_hit(&self) {
        self.search_hits.incr();
    }

    fn record_search_miss(&self) {
        self.search_misses.incr();
    }

    fn record_search_scan_step(&self) {
        self.search_scan_steps.incr();
    }

    fn record_get_call(&self) {
        self.get_calls.incr();
    }

    fn record_get_rejected(&self) {
        self.get_rejected.incr();
    }
}
