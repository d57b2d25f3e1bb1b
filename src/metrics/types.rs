use serde::Serialize;

/// Inclusive lower bound of the success status range.
const SUCCESS_STATUS_MIN: u16 = 200;
/// Exclusive upper bound of the success status range.
const SUCCESS_STATUS_MAX: u16 = 400;

/// Status in `[200, 400)` is a success; `0` (transport failure) and everything
/// else is an error.
#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    status >= SUCCESS_STATUS_MIN && status < SUCCESS_STATUS_MAX
}

/// One completed attempt, in the order it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub seq: u64,
    pub timestamp: String,
    pub duration_ms: f64,
    pub status: u16,
}

impl BenchmarkResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BenchmarkStats {
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub success: u64,
    pub total: u64,
    /// Integer percentage of attempts that were not successful.
    pub error_rate: u64,
    pub requests_per_second: f64,
    pub total_duration_ms: f64,
}

impl BenchmarkStats {
    #[must_use]
    pub const fn errors(&self) -> u64 {
        self.total.saturating_sub(self.success)
    }
}
