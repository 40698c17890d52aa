use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::TimedRingMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for ring metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; exporting never disturbs the caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<TimedRingMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TimedRingMetricsSnapshot) {
        self.write_counter("push_calls_total", snapshot.push_calls);
        self.write_counter("push_untimed_total", snapshot.push_untimed);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("pop_front_calls_total", snapshot.pop_front_calls);
        self.write_counter("pop_front_found_total", snapshot.pop_front_found);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("find_closest_calls_total", snapshot.find_closest_calls);
        self.write_counter("find_preceding_calls_total", snapshot.find_preceding_calls);
        self.write_counter("find_exact_calls_total", snapshot.find_exact_calls);
        self.write_counter("search_hits_total", snapshot.search_hits);
        self.write_counter("search_misses_total", snapshot.search_misses);
        self.write_counter("search_scan_steps_total", snapshot.search_scan_steps);
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_rejected_total", snapshot.get_rejected);
        self.write_gauge("len", snapshot.len as u64);
        self.write_gauge("live_limit", snapshot.live_limit as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}
