//! Per-request outcomes and the statistics derived from them.
mod histogram;
mod summary;
mod types;


pub use histogram::LatencyHistogram;
pub use summary::{Percentiles, StatsAccumulator, percentile, summarize};
pub use types::{BenchmarkResult, BenchmarkStats, is_success_status};
