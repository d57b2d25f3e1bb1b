use tokio::sync::{mpsc, watch};

use crate::metrics::BenchmarkStats;

use super::result_log::LogSnapshot;

/// Snapshot handed to observers while a run is in progress.
///
/// `stats` comes from the collector's running counters; its percentiles are
/// histogram estimates, exact only in the final summary.
#[derive(Debug, Clone)]
pub struct PartialUpdate {
    pub results: LogSnapshot,
    pub stats: BenchmarkStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Notify after every `n` completed results. `0` behaves like `Never`.
    EveryN(usize),
    Never,
}

impl NotifyPolicy {
    #[must_use]
    pub const fn should_notify(self, completed: usize) -> bool {
        match self {
            NotifyPolicy::EveryN(0) | NotifyPolicy::Never => false,
            NotifyPolicy::EveryN(n) => completed > 0 && completed % n == 0,
        }
    }
}

/// Receives progress and partial results from the collector task.
///
/// Calls happen on the collector task only; implementations must not block.
pub trait RunObserver: Send + Sync {
    /// Fraction of the run completed, within `[0, 1]`.
    fn on_progress(&self, progress: f64);

    fn on_partial(&self, update: PartialUpdate);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_progress(&self, _progress: f64) {}

    fn on_partial(&self, _update: PartialUpdate) {}
}

/// Forwards progress through a latest-value channel and partials through an
/// unbounded queue.
#[derive(Debug)]
pub struct ChannelObserver {
    progress: watch::Sender<f64>,
    partials: mpsc::UnboundedSender<PartialUpdate>,
}

/// Receiving halves paired with a [`ChannelObserver`].
#[derive(Debug)]
pub struct ObserverChannels {
    pub progress: watch::Receiver<f64>,
    pub partials: mpsc::UnboundedReceiver<PartialUpdate>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new() -> (Self, ObserverChannels) {
        let (progress_tx, progress_rx) = watch::channel(0.0);
        let (partials_tx, partials_rx) = mpsc::unbounded_channel();
        (
            Self {
                progress: progress_tx,
                partials: partials_tx,
            },
            ObserverChannels {
                progress: progress_rx,
                partials: partials_rx,
            },
        )
    }
}

impl RunObserver for ChannelObserver {
    fn on_progress(&self, progress: f64) {
        self.progress.send_replace(progress);
    }

    fn on_partial(&self, update: PartialUpdate) {
        // A dropped receiver only means nobody is listening anymore.
        drop(self.partials.send(update));
    }
}
