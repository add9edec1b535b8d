//! Completion counter with linear ETA
//!
//! Owned by the single loop that consumes completions, so it needs no
//! synchronization.

use std::time::{Duration, Instant};

/// Progress through the parallel phase
#[derive(Debug, Clone)]
pub struct ProgressCounter {
    completed: usize,
    total: usize,
    start: Instant,
}

/// Progress at the moment one completion was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
    pub remaining: Duration,
}

impl ProgressCounter {
    /// Start counting now
    pub fn new(total: usize) -> Self {
        Self::started_at(total, Instant::now())
    }

    pub fn started_at(total: usize, start: Instant) -> Self {
        Self {
            completed: 0,
            total,
            start,
        }
    }

    /// Record one completion now
    pub fn record(&mut self) -> ProgressSnapshot {
        self.record_at(Instant::now())
    }

    /// Record one completion observed at `now`
    pub fn record_at(&mut self, now: Instant) -> ProgressSnapshot {
        self.completed += 1;
        let elapsed = now.saturating_duration_since(self.start);

        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            elapsed,
            remaining: estimate_remaining(elapsed, self.completed, self.total),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// `elapsed / completed * (total - completed)`, assuming uniform item cost
pub fn estimate_remaining(elapsed: Duration, completed: usize, total: usize) -> Duration {
    if completed == 0 {
        return Duration::ZERO;
    }
    let left = total.saturating_sub(completed);
    elapsed.mul_f64(left as f64 / completed as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_remaining() {
        assert_eq!(
            estimate_remaining(Duration::from_secs(10), 2, 10),
            Duration::from_secs(40)
        );
        assert_eq!(estimate_remaining(Duration::from_secs(10), 10, 10), Duration::ZERO);
        assert_eq!(estimate_remaining(Duration::from_secs(10), 0, 10), Duration::ZERO);
    }

    #[test]
    fn test_record_at() {
        let start = Instant::now();
        let mut progress = ProgressCounter::started_at(4, start);

        let first = progress.record_at(start + Duration::from_secs(30));
        assert_eq!(first.completed, 1);
        assert_eq!(first.elapsed, Duration::from_secs(30));
        assert_eq!(first.remaining, Duration::from_secs(90));

        let second = progress.record_at(start + Duration::from_secs(40));
        assert_eq!(second.completed, 2);
        assert_eq!(second.remaining, Duration::from_secs(40));
        assert_eq!(progress.completed(), 2);
        assert_eq!(progress.total(), 4);
    }
}
