//! Timing helpers
//!
//! `now_ms` works both in the browser and in native test runs; `Timings`
//! keeps running per-operation totals so the session can report slow paths
//! in constant memory.

use serde::Serialize;
use std::collections::HashMap;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// High-resolution timestamp for measuring durations
pub fn precise_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(perf) = web_sys::window().and_then(|w| w.performance()) {
            return perf.now();
        }
    }
    now_ms() as f64
}

/// Summary for one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    pub operation: String,
    pub count: usize,
    pub average_ms: f64,
    pub max_ms: f64,
}

/// Running totals for one operation
#[derive(Debug, Clone, Copy, Default)]
struct Aggregate {
    count: usize,
    total_ms: f64,
    max_ms: f64,
}

/// Recorded durations per operation name
#[derive(Debug, Clone, Default)]
pub struct Timings {
    measurements: HashMap<String, Aggregate>,
}

impl Timings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, operation: &str, duration_ms: f64) {
        let entry = match self.measurements.get_mut(operation) {
            Some(entry) => entry,
            None => self.measurements.entry(operation.to_string()).or_default(),
        };
        entry.count += 1;
        entry.total_ms += duration_ms;
        entry.max_ms = entry.max_ms.max(duration_ms);
    }

    /// Run `f`, recording how long it took under `operation`
    pub fn measure<T>(&mut self, operation: &str, f: impl FnOnce() -> T) -> T {
        let start = precise_ms();
        let out = f();
        self.record(operation, precise_ms() - start);
        out
    }

    pub fn average(&self, operation: &str) -> Option<f64> {
        self.measurements
            .get(operation)
            .filter(|agg| agg.count > 0)
            .map(|agg| agg.total_ms / agg.count as f64)
    }

    /// All operations, sorted by name
    pub fn summary(&self) -> Vec<TimingSummary> {
        let mut out: Vec<TimingSummary> = self
            .measurements
            .iter()
            .map(|(op, agg)| TimingSummary {
                operation: op.clone(),
                count: agg.count,
                average_ms: self.average(op).unwrap_or(0.0),
                max_ms: agg.max_ms,
            })
            .collect();
        out.sort_by(|a, b| a.operation.cmp(&b.operation));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_summary() {
        let mut timings = Timings::new();
        timings.record("parse", 2.0);
        timings.record("parse", 4.0);
        timings.record("format", 1.0);
        assert_eq!(timings.average("parse"), Some(3.0));
        assert_eq!(timings.average("missing"), None);

        let summary = timings.summary();
        assert_eq!(summary[0].operation, "format");
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[1].max_ms, 4.0);
    }

    #[test]
    fn test_many_samples_keep_one_entry_per_operation() {
        let mut timings = Timings::new();
        for i in 0..5_000 {
            timings.record("parse", (i % 10) as f64);
        }
        timings.record("format:text", 1.5);

        let summary = timings.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(timings.measurements.len(), 2);
        assert_eq!(summary[1].operation, "parse");
        assert_eq!(summary[1].count, 5_000);
        assert_eq!(summary[1].max_ms, 9.0);
        assert_eq!(summary[1].average_ms, 4.5);
    }

    #[test]
    fn test_measure_returns_value() {
        let mut timings = Timings::new();
        let n = timings.measure("sum", || 1 + 2);
        assert_eq!(n, 3);
        assert_eq!(timings.summary()[0].count, 1);
    }
}
