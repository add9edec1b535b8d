//! Parallel dispatch phase
//!
//! Every item is submitted at once; at most `pool.len()` requests are in
//! flight. Completions are consumed in arrival order by a single loop, which
//! owns the progress counter and the failure set.
//!
//! ```text
//!  items[0..n] ──▶ assign(i) = pool[i mod N] ──▶ buffer_unordered(N)
//!                                                      │
//!                                  Completion { index, outcome }
//!                                                      │
//!                          progress line ◀── consumer ──▶ FailureSet
//! ```

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::models::{Completion, Outcome, WorkItem};
use crate::synthesis::Executor;

use super::pool::ServerPool;
use super::progress::ProgressCounter;
use super::report::{BatchReport, Reporter};
use super::retry::RetryController;

/// Items whose first attempt failed, in original input order
#[derive(Debug, Clone, Default)]
pub struct FailureSet {
    entries: Vec<(usize, WorkItem)>,
}

impl FailureSet {
    /// Record the item that was submitted at `index`
    pub fn push(&mut self, index: usize, item: WorkItem) {
        let at = self.entries.partition_point(|(i, _)| *i < index);
        self.entries.insert(at, (index, item));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original positions of the failed items
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(i, _)| *i)
    }

    pub fn items(&self) -> impl Iterator<Item = &WorkItem> {
        self.entries.iter().map(|(_, item)| item)
    }
}

/// Result of the parallel phase
#[derive(Debug, Clone, Default)]
pub struct ParallelReport {
    /// One outcome per item, in completion order
    pub outcomes: Vec<Outcome>,

    /// Items to hand to the retry pass
    pub failures: FailureSet,
}

/// Drives both phases of a batch
pub struct Dispatcher {
    executor: Arc<dyn Executor>,
    pool: ServerPool,
    reporter: Arc<dyn Reporter>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn Executor>, pool: ServerPool, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            executor,
            pool,
            reporter,
        }
    }

    /// Run the parallel phase, then retry its failures serially on `pool[0]`
    pub async fn run(&self, items: &[WorkItem]) -> BatchReport {
        let parallel = self.run_parallel(items).await;

        let retry = RetryController::new(
            Arc::clone(&self.executor),
            self.pool.primary().clone(),
            Arc::clone(&self.reporter),
        );
        let retries = retry.run(&parallel.failures).await;

        BatchReport {
            total: items.len(),
            initial: parallel.outcomes,
            retries,
        }
    }

    /// Run every item once, `pool.len()` at a time
    ///
    /// Returns only after every submitted request has finished.
    pub async fn run_parallel(&self, items: &[WorkItem]) -> ParallelReport {
        let total = items.len();
        let workers = self.pool.len();

        self.reporter.dispatch_started(total, workers);
        tracing::info!(total, servers = workers, "Starting parallel phase");

        let executor = self.executor.as_ref();
        let pool = &self.pool;

        let mut completions = stream::iter(items.iter().enumerate())
            .map(move |(index, item)| async move {
                let outcome = executor.execute(item, pool.assign(index)).await;
                Completion { index, outcome }
            })
            .buffer_unordered(workers);

        let mut progress = ProgressCounter::new(total);
        let mut report = ParallelReport {
            outcomes: Vec::with_capacity(total),
            failures: FailureSet::default(),
        };

        while let Some(Completion { index, outcome }) = completions.next().await {
            let snapshot = progress.record();
            self.reporter.progress(&outcome, &snapshot);

            if !outcome.success {
                tracing::warn!(
                    index,
                    id = %outcome.item_id,
                    server = %outcome.server,
                    detail = %outcome.detail,
                    "Item failed"
                );
                // Items with no text are retried too and fail again without
                // a request, so they end up among the terminal failures.
                report.failures.push(index, items[index].clone());
            }

            report.outcomes.push(outcome);
        }

        tracing::info!(
            completed = progress.completed(),
            failed = report.failures.len(),
            "Parallel phase finished"
        );

        report
    }
}
