//! State of a single progress bar.

use std::time::{Duration, Instant};

/// One progress bar: counts, timer start and completion flag.
///
/// `completed <= total` holds after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBarState {
    completed: usize,
    total: usize,
    start_time: Instant,
    finished: bool,
}

impl ProgressBarState {
    pub fn new(total: usize, start_time: Instant) -> Self {
        Self {
            completed: 0,
            total,
            start_time,
            finished: false,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Set both counts at once. A `completed` above `total` raises `total`.
    pub fn set(&mut self, completed: usize, total: usize) {
        self.completed = completed;
        self.total = total.max(completed);
        self.finished = false;
    }

    /// Set only the completed count, clamped to the current total.
    pub fn set_completed(&mut self, completed: usize) {
        self.completed = completed.min(self.total);
        self.finished = false;
    }

    /// Restart the timer with a fresh total.
    pub fn restart(&mut self, total: usize, now: Instant) {
        self.completed = 0;
        self.total = total;
        self.start_time = now;
        self.finished = false;
    }

    /// Fill the bar and mark it complete.
    pub fn finish(&mut self, total: usize) {
        self.completed = total;
        self.total = total;
        self.finished = true;
    }

    /// `"completed/total"` while running, `"Complete!"` once finished.
    pub fn status_label(&self) -> String {
        if self.finished {
            "Complete!".to_string()
        } else {
            format!("{}/{}", self.completed, self.total)
        }
    }

    /// Fraction done in `[0, 1]`. An empty finished bar counts as full.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            if self.finished { 1.0 } else { 0.0 }
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Time since the bar's timer started, as seen at `now`.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bar() {
        let bar = ProgressBarState::new(10, Instant::now());
        assert_eq!(bar.completed(), 0);
        assert_eq!(bar.total(), 10);
        assert_eq!(bar.status_label(), "0/10");
        assert_eq!(bar.ratio(), 0.0);
    }

    #[test]
    fn test_set_clamps_total_up() {
        let mut bar = ProgressBarState::new(4, Instant::now());
        bar.set(6, 4);
        assert_eq!(bar.completed(), 6);
        assert_eq!(bar.total(), 6);
        assert_eq!(bar.ratio(), 1.0);
    }

    #[test]
    fn test_set_allows_shrinking_total() {
        let mut bar = ProgressBarState::new(30, Instant::now());
        bar.set(7, 12);
        assert_eq!(bar.status_label(), "7/12");
    }

    #[test]
    fn test_finish() {
        let mut bar = ProgressBarState::new(30, Instant::now());
        bar.set(3, 30);
        bar.finish(18);
        assert!(bar.is_finished());
        assert_eq!(bar.completed(), 18);
        assert_eq!(bar.total(), 18);
        assert_eq!(bar.status_label(), "Complete!");
    }

    #[test]
    fn test_empty_bar_ratio() {
        let mut bar = ProgressBarState::new(0, Instant::now());
        assert_eq!(bar.ratio(), 0.0);
        bar.finish(0);
        assert_eq!(bar.ratio(), 1.0);
    }

    #[test]
    fn test_restart_resets_timer_and_counts() {
        let start = Instant::now();
        let mut bar = ProgressBarState::new(5, start);
        bar.finish(5);
        let later = start + Duration::from_secs(3);
        bar.restart(8, later);
        assert_eq!(bar.completed(), 0);
        assert_eq!(bar.total(), 8);
        assert!(!bar.is_finished());
        assert_eq!(bar.elapsed_at(later + Duration::from_secs(1)), Duration::from_secs(1));
    }

    #[test]
    fn test_elapsed_never_negative() {
        let start = Instant::now();
        let bar = ProgressBarState::new(1, start + Duration::from_secs(5));
        assert_eq!(bar.elapsed_at(start), Duration::ZERO);
    }
}
