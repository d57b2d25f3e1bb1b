use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::debug;

use crate::{
    http::{AttemptOutcome, StopRule},
    metrics::{BenchmarkResult, LatencyHistogram, StatsAccumulator},
};

use super::observer::{NotifyPolicy, PartialUpdate, RunObserver};
use super::result_log::ResultLog;

/// Upper bound on the log capacity reserved up front.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Owns the result log for one run. Workers only ever talk to it through
/// the outcome channel.
pub(super) struct Collector {
    log: ResultLog,
    counters: StatsAccumulator,
    latencies: LatencyHistogram,
    stop: StopRule,
    notify: NotifyPolicy,
    started: Instant,
    observer: Arc<dyn RunObserver>,
}

impl Collector {
    pub(super) fn new(
        stop: StopRule,
        notify: NotifyPolicy,
        started: Instant,
        latencies: LatencyHistogram,
        observer: Arc<dyn RunObserver>,
    ) -> Self {
        let capacity = match stop {
            StopRule::Count(count) => usize::try_from(count)
                .unwrap_or(MAX_PREALLOCATED)
                .min(MAX_PREALLOCATED),
            StopRule::Duration(_) => 0,
        };
        Self {
            log: ResultLog::with_capacity(capacity),
            counters: StatsAccumulator::new(),
            latencies,
            stop,
            notify,
            started,
            observer,
        }
    }

    fn record(&mut self, outcome: AttemptOutcome) {
        let seq = u64::try_from(self.log.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let result = outcome.into_result(seq);
        self.counters.record(&result);
        self.latencies.record(result.duration_ms);
        let completed = self.log.push(result);

        self.observer.on_progress(self.progress(completed));
        if self.notify.should_notify(completed) {
            let stats = self
                .counters
                .finish(self.latencies.percentiles(), self.started.elapsed());
            debug!(
                "Partial update: {} results, {} ok",
                stats.total, stats.success
            );
            self.observer.on_partial(PartialUpdate {
                results: self.log.snapshot(),
                stats,
            });
        }
    }

    fn progress(&self, completed: usize) -> f64 {
        let fraction = match self.stop {
            StopRule::Count(0) => 1.0,
            StopRule::Count(count) => completed as f64 / count as f64,
            StopRule::Duration(duration) if duration.is_zero() => 1.0,
            StopRule::Duration(duration) => {
                self.started.elapsed().as_secs_f64() / duration.as_secs_f64()
            }
        };
        fraction.clamp(0.0, 1.0)
    }

    pub(super) fn observer(&self) -> &dyn RunObserver {
        self.observer.as_ref()
    }

    pub(super) fn into_results(self) -> Vec<BenchmarkResult> {
        self.log.into_results()
    }
}

/// Drains worker outcomes until every sender is dropped.
pub(super) fn spawn_collector(
    mut collector: Collector,
    mut outcome_rx: mpsc::Receiver<AttemptOutcome>,
) -> JoinHandle<Collector> {
    tokio::spawn(async move {
        while let Some(outcome) = outcome_rx.recv().await {
            collector.record(outcome);
        }
        collector
    })
}
