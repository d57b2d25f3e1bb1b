use std::time::Duration;

use super::{BenchmarkResult, BenchmarkStats};

/// Percentiles are expressed in per-mille so index selection stays integral.
const PER_MILLE: usize = 1000;
const P90: usize = 900;
const P95: usize = 950;
const P99: usize = 990;
const PERCENT: u64 = 100;

/// Tail latencies in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Percentiles {
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl Percentiles {
    /// Nearest-rank percentiles over an ascending slice.
    #[must_use]
    pub fn from_sorted(sorted: &[f64]) -> Self {
        Self {
            p90_ms: percentile(sorted, P90),
            p95_ms: percentile(sorted, P95),
            p99_ms: percentile(sorted, P99),
        }
    }
}

/// Running count/success/sum/min/max over recorded results.
///
/// `min_ms` starts at infinity and is only reported once something has been
/// recorded.
#[derive(Debug, Clone, Copy)]
pub struct StatsAccumulator {
    total: u64,
    success: u64,
    sum_ms: f64,
    min_ms: f64,
    max_ms: f64,
}

impl Default for StatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAccumulator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            success: 0,
            sum_ms: 0.0,
            min_ms: f64::INFINITY,
            max_ms: 0.0,
        }
    }

    pub fn record(&mut self, result: &BenchmarkResult) {
        self.total = self.total.saturating_add(1);
        if result.is_success() {
            self.success = self.success.saturating_add(1);
        }
        self.sum_ms += result.duration_ms;
        self.min_ms = self.min_ms.min(result.duration_ms);
        self.max_ms = self.max_ms.max(result.duration_ms);
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn success(&self) -> u64 {
        self.success
    }

    /// Builds a stats snapshot from the running counters and `percentiles`
    /// taken over the same recorded durations.
    #[must_use]
    pub fn finish(&self, percentiles: Percentiles, elapsed: Duration) -> BenchmarkStats {
        if self.total == 0 {
            return BenchmarkStats::default();
        }

        let total = self.total as f64;
        let elapsed_secs = elapsed.as_secs_f64();
        let requests_per_second = if elapsed_secs > 0.0 {
            total / elapsed_secs
        } else {
            0.0
        };
        let error_rate = self
            .total
            .saturating_sub(self.success)
            .saturating_mul(PERCENT)
            .checked_div(self.total)
            .unwrap_or(0);

        BenchmarkStats {
            avg_ms: self.sum_ms / total,
            min_ms: self.min_ms,
            max_ms: self.max_ms,
            p90_ms: percentiles.p90_ms,
            p95_ms: percentiles.p95_ms,
            p99_ms: percentiles.p99_ms,
            success: self.success,
            total: self.total,
            error_rate,
            requests_per_second,
            total_duration_ms: self.sum_ms,
        }
    }
}

/// Nearest-rank percentile over an ascending slice: index `floor(p * N)`,
/// clamped to the last element. `per_mille` is `p * 1000`.
#[must_use]
pub fn percentile(sorted: &[f64], per_mille: usize) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let index = per_mille
        .saturating_mul(sorted.len())
        .checked_div(PER_MILLE)
        .unwrap_or(0)
        .min(last);
    sorted.get(index).copied().unwrap_or(0.0)
}

/// Summarizes `results` against the wall-clock time the run has taken so far.
#[must_use]
pub fn summarize(results: &[BenchmarkResult], elapsed: Duration) -> BenchmarkStats {
    let mut accumulator = StatsAccumulator::new();
    let mut durations = Vec::with_capacity(results.len());
    for result in results {
        accumulator.record(result);
        durations.push(result.duration_ms);
    }
    durations.sort_by(f64::total_cmp);
    accumulator.finish(Percentiles::from_sorted(&durations), elapsed)
}
