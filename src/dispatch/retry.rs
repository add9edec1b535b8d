//! Serial retry pass
//!
//! Runs strictly after the parallel phase has drained. Every failed item is
//! tried once more, one at a time, on a single server. Anything still failing
//! afterwards is terminal and only reported.

use std::sync::Arc;

use crate::models::{Address, Outcome};
use crate::synthesis::Executor;

use super::engine::FailureSet;
use super::report::Reporter;

/// Re-executes failed items on one fixed server
pub struct RetryController {
    executor: Arc<dyn Executor>,
    server: Address,
    reporter: Arc<dyn Reporter>,
}

impl RetryController {
    pub fn new(executor: Arc<dyn Executor>, server: Address, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            executor,
            server,
            reporter,
        }
    }

    /// Retry every item in `failures`, in order, one at a time
    pub async fn run(&self, failures: &FailureSet) -> Vec<Outcome> {
        if failures.is_empty() {
            return Vec::new();
        }

        self.reporter.retry_started(failures.len(), &self.server);
        tracing::info!(count = failures.len(), server = %self.server, "Starting retry phase");

        let mut outcomes = Vec::with_capacity(failures.len());
        for item in failures.items() {
            let outcome = self.executor.execute(item, &self.server).await;
            self.reporter.retry(&outcome);

            if !outcome.success {
                tracing::error!(
                    id = %outcome.item_id,
                    server = %outcome.server,
                    detail = %outcome.detail,
                    "Item failed after retry"
                );
            }

            outcomes.push(outcome);
        }

        outcomes
    }
}
