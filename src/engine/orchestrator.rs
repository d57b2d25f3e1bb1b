use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet, time::Instant};
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, AppResult, ValidationError},
    http::{RequestConfig, RequestExecutor, StopRule},
    metrics::{LatencyHistogram, summarize},
    shutdown::CancelSignal,
};

use super::collector::{Collector, spawn_collector};
use super::observer::RunObserver;
use super::worker::{Admission, RequestLimiter, WorkerContext, WorkerExit, spawn_worker};
use super::{RunOptions, RunOutcome, RunState};

/// Runs one load test to completion or cancellation.
///
/// Spawns `max(1, concurrent_users)` workers that share `executor`. Every
/// completed attempt is forwarded to a single collector task which numbers
/// it, keeps running counters and informs `observer`.
///
/// # Errors
///
/// Returns a validation error before any worker starts when the config is
/// unusable, or when a duration-mode run is not longer than the executor's
/// timeout. Returns a join error if a worker or the collector panics; the
/// remaining tasks are aborted first.
pub async fn run_load_test(
    config: &RequestConfig,
    executor: Arc<dyn RequestExecutor>,
    observer: Arc<dyn RunObserver>,
    cancel: &CancelSignal,
    options: RunOptions,
) -> AppResult<RunOutcome> {
    config.validate()?;
    let stop = config.stop_rule();
    let timeout = executor.timeout();
    if let StopRule::Duration(duration) = stop
        && duration <= timeout
    {
        return Err(AppError::validation(ValidationError::DurationWithinTimeout {
            duration_secs: duration.as_secs(),
            timeout_ms: timeout.as_millis(),
        }));
    }

    let users = config.users();
    info!(
        "Starting load test: {} {} with {} user(s), {:?}",
        config.method, config.url, users, stop
    );

    let started = Instant::now();
    let admission = match stop {
        StopRule::Count(count) => Admission::Count(Arc::new(RequestLimiter::new(count))),
        StopRule::Duration(duration) => Admission::Deadline {
            deadline: started.checked_add(duration).unwrap_or(started),
            headroom: timeout,
        },
    };

    let latencies = LatencyHistogram::new()?;
    let (outcome_tx, outcome_rx) = mpsc::channel(users.max(1));
    let collector = spawn_collector(
        Collector::new(stop, options.notify, started, latencies, observer),
        outcome_rx,
    );

    let mut workers = JoinSet::new();
    for id in 0..users {
        spawn_worker(
            &mut workers,
            id,
            WorkerContext {
                executor: Arc::clone(&executor),
                admission: admission.clone(),
                cancel: cancel.clone(),
                outcome_tx: outcome_tx.clone(),
                pacing: options.pacing,
            },
        );
    }
    drop(outcome_tx);

    let mut state = RunState::Completed;
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(WorkerExit::Finished) => {}
            Ok(WorkerExit::Cancelled) => state = RunState::Cancelled,
            Err(err) => {
                warn!("Worker failed, aborting the run: {}", err);
                workers.abort_all();
                collector.abort();
                return Err(err.into());
            }
        }
    }
    let elapsed = started.elapsed();
    let collector = collector.await?;

    if state == RunState::Completed {
        collector.observer().on_progress(1.0);
    }
    let results = collector.into_results();
    let stats = summarize(&results, elapsed);
    debug!("Collected {} results in {:?}", results.len(), elapsed);
    info!(
        "Load test {}: {} requests, {} ok, {:.2} req/s",
        state.as_str(),
        stats.total,
        stats.success,
        stats.requests_per_second
    );

    Ok(RunOutcome {
        results,
        stats,
        state,
    })
}
