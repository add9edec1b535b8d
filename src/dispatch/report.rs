//! Console reporting and batch summary

use std::sync::Mutex;

use crate::models::{Address, Outcome};
use crate::utils::format_hms;

use super::progress::ProgressSnapshot;

/// Line printed for each parallel-phase completion
pub fn progress_line(outcome: &Outcome, progress: &ProgressSnapshot) -> String {
    format!(
        "[{}] {} @ {} :: {}  ({}/{})  Elapsed: {}  Remaining: {}",
        outcome.marker(),
        outcome.item_id,
        outcome.server,
        outcome.detail,
        progress.completed,
        progress.total,
        format_hms(progress.elapsed),
        format_hms(progress.remaining),
    )
}

/// Line printed for each retry attempt
pub fn retry_line(outcome: &Outcome) -> String {
    format!(
        "[Retry {}] {} @ {} :: {}",
        outcome.marker(),
        outcome.item_id,
        outcome.server,
        outcome.detail
    )
}

/// Receives dispatch events as they happen
pub trait Reporter: Send + Sync {
    /// Parallel phase is about to start
    fn dispatch_started(&self, _total: usize, _servers: usize) {}

    /// One parallel-phase attempt finished
    fn progress(&self, outcome: &Outcome, progress: &ProgressSnapshot);

    /// Retry phase is about to start
    fn retry_started(&self, _count: usize, _server: &Address) {}

    /// One retry attempt finished
    fn retry(&self, outcome: &Outcome);
}

/// Prints progress lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn dispatch_started(&self, total: usize, servers: usize) {
        println!("Loaded {total} items, dispatching to {servers} servers...");
    }

    fn progress(&self, outcome: &Outcome, progress: &ProgressSnapshot) {
        println!("{}", progress_line(outcome, progress));
    }

    fn retry_started(&self, count: usize, server: &Address) {
        println!("\nRe-running {count} failed items on {server}...\n");
    }

    fn retry(&self, outcome: &Outcome) {
        println!("{}", retry_line(outcome));
    }
}

/// Keeps every rendered line in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Reporter for MemoryReporter {
    fn progress(&self, outcome: &Outcome, progress: &ProgressSnapshot) {
        self.push(progress_line(outcome, progress));
    }

    fn retry(&self, outcome: &Outcome) {
        self.push(retry_line(outcome));
    }
}

/// Totals for a whole run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Number of input items
    pub total: usize,

    /// Parallel-phase outcomes, in completion order
    pub initial: Vec<Outcome>,

    /// Retry-phase outcomes, in original item order
    pub retries: Vec<Outcome>,
}

impl BatchReport {
    pub fn initial_successes(&self) -> usize {
        self.initial.iter().filter(|o| o.success).count()
    }

    pub fn initial_failures(&self) -> usize {
        self.initial.len() - self.initial_successes()
    }

    /// Items that failed first but succeeded on retry
    pub fn recovered(&self) -> usize {
        self.retries.iter().filter(|o| o.success).count()
    }

    /// Retry outcomes that still failed
    pub fn terminal_failures(&self) -> impl Iterator<Item = &Outcome> {
        self.retries.iter().filter(|o| !o.success)
    }

    pub fn succeeded(&self) -> usize {
        self.initial_successes() + self.recovered()
    }

    /// Every item produced audio in one of the two passes
    pub fn is_success(&self) -> bool {
        self.terminal_failures().next().is_none()
    }

    /// Process exit code: 0 when everything succeeded, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
