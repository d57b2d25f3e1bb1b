use std::sync::{Arc, PoisonError, RwLock};

use crate::metrics::BenchmarkResult;

/// Append-only result log owned by the collector. Snapshots share the
/// storage and only remember how long the log was when they were taken.
#[derive(Debug)]
pub(super) struct ResultLog {
    entries: Arc<RwLock<Vec<BenchmarkResult>>>,
    len: usize,
}

impl ResultLog {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::with_capacity(capacity))),
            len: 0,
        }
    }

    pub(super) const fn len(&self) -> usize {
        self.len
    }

    /// Appends `result` and returns the new length.
    pub(super) fn push(&mut self, result: BenchmarkResult) -> usize {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
        self.len = self.len.saturating_add(1);
        self.len
    }

    pub(super) fn snapshot(&self) -> LogSnapshot {
        LogSnapshot {
            entries: Arc::clone(&self.entries),
            len: self.len,
        }
    }

    /// Takes the log back, copying it only if a snapshot is still alive.
    pub(super) fn into_results(self) -> Vec<BenchmarkResult> {
        match Arc::try_unwrap(self.entries) {
            Ok(entries) => entries.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

/// Read-only view of the first `len()` results of a run, in `seq` order.
///
/// Taking a snapshot is O(1); later appends to the log are not visible
/// through it.
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    entries: Arc<RwLock<Vec<BenchmarkResult>>>,
    len: usize,
}

impl LogSnapshot {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Runs `f` over the snapshot's results while holding a read lock on the
    /// log. Keep `f` short; the collector waits for it before appending.
    pub fn with_results<R>(&self, f: impl FnOnce(&[BenchmarkResult]) -> R) -> R {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f(entries.get(..self.len).unwrap_or(entries.as_slice()))
    }

    /// Owned copy of the snapshot's results.
    #[must_use]
    pub fn to_vec(&self) -> Vec<BenchmarkResult> {
        self.with_results(<[BenchmarkResult]>::to_vec)
    }
}
