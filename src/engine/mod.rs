mod collector;
mod observer;
mod orchestrator;
mod result_log;
mod worker;


use std::time::Duration;

use crate::metrics::{BenchmarkResult, BenchmarkStats};

pub use observer::{
    ChannelObserver, NoopObserver, NotifyPolicy, ObserverChannels, PartialUpdate, RunObserver,
};
pub use orchestrator::run_load_test;
pub use result_log::LogSnapshot;

/// Default number of completed results between partial updates.
pub const DEFAULT_NOTIFY_EVERY: usize = 5;
/// Default pause a worker takes between two attempts.
pub const DEFAULT_PACING: Duration = Duration::from_millis(10);

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Completed,
    Cancelled,
}

impl RunState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub notify: NotifyPolicy,
    pub pacing: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            notify: NotifyPolicy::EveryN(DEFAULT_NOTIFY_EVERY),
            pacing: DEFAULT_PACING,
        }
    }
}

/// Complete result log of one run together with its summary.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub results: Vec<BenchmarkResult>,
    pub stats: BenchmarkStats,
    pub state: RunState,
}

impl RunOutcome {
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }
}
