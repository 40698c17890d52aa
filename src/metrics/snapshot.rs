/// Point-in-time copy of a ring's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimedRingMetricsSnapshot {
    pub push_calls: u64,
    pub push_untimed: u64,
    pub evicted_entries: u64,

    pub pop_front_calls: u64,
    pub pop_front_found: u64,
    pub clear_calls: u64,

    pub find_closest_calls: u64,
    pub find_preceding_calls: u64,
    pub find_exact_calls: u64,
    pub search_hits: u64,
    pub search_misses: u64,
    pub search_scan_steps: u64, // slots visited across all searches

    pub get_calls: u64,
    pub get_rejected: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub live_limit: usize,
    pub capacity: usize,
}

impl TimedRingMetricsSnapshot {
    /// Total number of time searches of any kind.
    pub fn search_calls(&self) -> u64 {
        self.find_closest_calls + self.find_preceding_calls + self.find_exact_calls
    }

    /// Fraction of searches that found a sample, or `None` before any search.
    pub fn search_hit_rate(&self) -> Option<f64> {
        let total = self.search_hits + self.search_misses;
        if total == 0 {
            None
        } else {
            Some(self.search_hits as f64 / total as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_none_without_searches() {
        assert_eq!(TimedRingMetricsSnapshot::default().search_hit_rate(), None);
    }

    #[test]
    fn hit_rate_and_call_totals() {
        let snap = TimedRingMetricsSnapshot {
            find_closest_calls: 2,
            find_preceding_calls: 1,
            find_exact_calls: 1,
            search_hits: 3,
            search_misses: 1,
            ..Default::default()
        };
        assert_eq!(snap.search_calls(), 4);
        assert_eq!(snap.search_hit_rate(), Some(0.75));
    }
}
