//! Batch dispatch across the server pool
//!
//! - [`pool`] - fixed server list and positional assignment
//! - [`progress`] - completion counter and ETA
//! - [`engine`] - bounded parallel phase
//! - [`retry`] - serial second pass on the first server
//! - [`report`] - progress lines and batch totals

pub mod engine;
pub mod pool;
pub mod progress;
pub mod report;
pub mod retry;

pub use engine::{Dispatcher, FailureSet, ParallelReport};
pub use pool::ServerPool;
pub use progress::{ProgressCounter, ProgressSnapshot};
pub use report::{BatchReport, ConsoleReporter, MemoryReporter, Reporter};
pub use retry::RetryController;
