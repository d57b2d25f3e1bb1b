use hdrhistogram::Histogram;

use crate::error::MetricsError;

use super::Percentiles;

const SIGNIFICANT_DIGITS: u8 = 3;
const MICROS_PER_MS: f64 = 1000.0;

/// Streaming latency distribution used for partial snapshots while a run is
/// still in progress. Values are kept in microseconds to three significant
/// digits.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create an empty, auto-resizing histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(SIGNIFICANT_DIGITS).map_err(|err| {
            MetricsError::Histogram {
                context: "create latency histogram",
                source: Box::new(err),
            }
        })?;
        Ok(Self { hist })
    }

    pub fn record(&mut self, duration_ms: f64) {
        let micros = (duration_ms.max(0.0) * MICROS_PER_MS).round() as u64;
        self.hist.saturating_record(micros);
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    #[must_use]
    pub fn percentiles(&self) -> Percentiles {
        if self.hist.is_empty() {
            return Percentiles::default();
        }
        Percentiles {
            p90_ms: self.quantile_ms(0.90),
            p95_ms: self.quantile_ms(0.95),
            p99_ms: self.quantile_ms(0.99),
        }
    }

    fn quantile_ms(&self, quantile: f64) -> f64 {
        self.hist.value_at_quantile(quantile) as f64 / MICROS_PER_MS
    }
}
