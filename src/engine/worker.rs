use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinSet, time::Instant};
use tracing::debug;

use crate::{
    http::{AttemptOutcome, RequestExecutor},
    shutdown::CancelSignal,
};

/// Hands out at most `limit` request slots across all workers.
#[derive(Debug)]
pub(super) struct RequestLimiter {
    limit: u64,
    counter: AtomicU64,
}

impl RequestLimiter {
    pub(super) const fn new(limit: u64) -> Self {
        Self {
            limit,
            counter: AtomicU64::new(0),
        }
    }

    pub(super) fn try_reserve(&self) -> bool {
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            if current >= self.limit {
                return false;
            }
            let Some(next) = current.checked_add(1) else {
                return false;
            };
            if self
                .counter
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }
}

/// Decides whether a worker may start another attempt.
#[derive(Debug, Clone)]
pub(super) enum Admission {
    Count(Arc<RequestLimiter>),
    /// Attempts must be able to finish, timeout included, before the deadline.
    Deadline { deadline: Instant, headroom: Duration },
}

impl Admission {
    fn admit(&self) -> bool {
        match self {
            Admission::Count(limiter) => limiter.try_reserve(),
            Admission::Deadline { deadline, headroom } => {
                let now = Instant::now();
                if now >= *deadline {
                    return false;
                }
                now.checked_add(*headroom)
                    .is_some_and(|finish| finish <= *deadline)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WorkerExit {
    Finished,
    Cancelled,
}

pub(super) struct WorkerContext {
    pub(super) executor: Arc<dyn RequestExecutor>,
    pub(super) admission: Admission,
    pub(super) cancel: CancelSignal,
    pub(super) outcome_tx: mpsc::Sender<AttemptOutcome>,
    pub(super) pacing: Duration,
}

/// Spawns one virtual user onto `workers`.
pub(super) fn spawn_worker(
    workers: &mut JoinSet<WorkerExit>,
    id: usize,
    context: WorkerContext,
) {
    workers.spawn(async move {
        let exit = run_worker(&context).await;
        debug!("Worker {} exited: {:?}", id, exit);
        exit
    });
}

async fn run_worker(context: &WorkerContext) -> WorkerExit {
    loop {
        if context.cancel.is_cancelled() {
            return WorkerExit::Cancelled;
        }
        if !context.admission.admit() {
            return WorkerExit::Finished;
        }

        let outcome = context.executor.attempt().await;
        // Waits while the collector is behind.
        if context.outcome_tx.send(outcome).await.is_err() {
            return WorkerExit::Finished;
        }

        if !context.pacing.is_zero() {
            tokio::select! {
                () = tokio::time::sleep(context.pacing) => {}
                () = context.cancel.cancelled() => return WorkerExit::Cancelled,
            }
        }
    }
}
