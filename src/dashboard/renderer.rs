//! Dashboard renderer - shared progress state.
//!
//! The `Dashboard` owns both progress bars and the activity log behind a
//! single mutex. The executor mutates it through the `advance_*`/`complete_*`
//! operations while the live display driver calls `render()` on its own
//! cadence. Every operation takes the lock once, so a render never observes
//! half of an update.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::activity::{ActivityLog, EntryKind, LogEntry, VISIBLE_MESSAGES};
use super::bar::ProgressBarState;
use super::view::{BarView, DashboardView};

#[derive(Debug)]
struct DashboardState {
    outer: ProgressBarState,
    inner: ProgressBarState,
    log: ActivityLog,
}

/// Cloneable handle to the shared dashboard state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: Arc<Mutex<DashboardState>>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_log_lines(VISIBLE_MESSAGES)
    }

    /// Create a dashboard showing `log_lines` activity messages.
    pub fn with_log_lines(log_lines: usize) -> Self {
        let now = Instant::now();
        Self {
            state: Arc::new(Mutex::new(DashboardState {
                outer: ProgressBarState::new(0, now),
                inner: ProgressBarState::new(0, now),
                log: ActivityLog::with_visible(log_lines),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        // State is plain data; a panic mid-update cannot leave it unusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialise both bars and start their timers. Call once per run.
    pub fn start(&self, outer_total: usize, inner_total: usize) {
        let now = Instant::now();
        let mut state = self.lock();
        state.outer = ProgressBarState::new(outer_total, now);
        state.inner = ProgressBarState::new(inner_total, now);
    }

    /// Set the outer bar to `step` completed iterations.
    pub fn advance_outer(&self, step: usize) {
        self.lock().outer.set_completed(step);
    }

    /// Restart the inner bar for a new outer iteration.
    pub fn reset_inner(&self, new_total: usize) {
        self.lock().inner.restart(new_total, Instant::now());
    }

    /// Update the inner bar. `total` may shrink; it is raised to `step` if needed.
    pub fn advance_inner(&self, step: usize, total: usize) {
        self.lock().inner.set(step, total);
    }

    pub fn complete_outer(&self) {
        let mut state = self.lock();
        let total = state.outer.total();
        state.outer.finish(total);
    }

    pub fn complete_inner(&self, total: usize) {
        self.lock().inner.finish(total);
    }

    pub fn add_message(&self, text: impl Into<String>) {
        self.log(EntryKind::Info, text);
    }

    /// Append a styled message to the activity log.
    pub fn log(&self, kind: EntryKind, text: impl Into<String>) {
        self.lock().log.push(LogEntry::new(kind, text));
    }

    /// Build the display tree for the current instant.
    pub fn render(&self) -> DashboardView {
        self.render_at(Instant::now())
    }

    /// Build the display tree with elapsed times measured at `now`.
    pub fn render_at(&self, now: Instant) -> DashboardView {
        let state = self.lock();
        DashboardView {
            outer: BarView::from_state("Outer Loop", &state.outer, now),
            inner: BarView::from_state("Inner Loop", &state.inner, now),
            log: state.log.tail().to_vec(),
            log_lines: state.log.visible(),
        }
    }

    pub fn outer_elapsed(&self) -> Duration {
        self.lock().outer.elapsed_at(Instant::now())
    }

    pub fn outer_bar(&self) -> ProgressBarState {
        self.lock().outer.clone()
    }

    pub fn inner_bar(&self) -> ProgressBarState {
        self.lock().inner.clone()
    }

    /// Number of messages logged so far, including ones no longer visible.
    pub fn message_count(&self) -> usize {
        self.lock().log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_initialises_bars() {
        let dashboard = Dashboard::new();
        dashboard.start(5, 30);
        let view = dashboard.render();
        assert_eq!(view.outer.status, "0/5");
        assert_eq!(view.inner.status, "0/30");
        assert_eq!(view.outer.ratio, 0.0);
        assert!(view.log.is_empty());
    }

    #[test]
    fn test_advance_outer_updates_status() {
        let dashboard = Dashboard::new();
        dashboard.start(4, 6);
        dashboard.advance_outer(3);
        let view = dashboard.render();
        assert_eq!(view.outer.status, "3/4");
        assert_eq!(view.outer.ratio, 0.75);
    }

    #[test]
    fn test_reset_and_advance_inner() {
        let dashboard = Dashboard::new();
        dashboard.start(2, 10);
        dashboard.advance_inner(4, 10);
        dashboard.reset_inner(12);
        let bar = dashboard.inner_bar();
        assert_eq!(bar.completed(), 0);
        assert_eq!(bar.total(), 12);
        dashboard.advance_inner(5, 12);
        assert_eq!(dashboard.render().inner.status, "5/12");
    }

    #[test]
    fn test_advance_inner_never_shows_overflow() {
        let dashboard = Dashboard::new();
        dashboard.start(1, 4);
        dashboard.advance_inner(6, 4);
        let bar = dashboard.inner_bar();
        assert_eq!(bar.completed(), 6);
        assert_eq!(bar.total(), 6);
        assert_eq!(dashboard.render().inner.ratio, 1.0);
    }

    #[test]
    fn test_complete_sets_label() {
        let dashboard = Dashboard::new();
        dashboard.start(3, 9);
        dashboard.complete_inner(7);
        dashboard.complete_outer();
        let view = dashboard.render();
        assert_eq!(view.outer.status, "Complete!");
        assert_eq!(view.inner.status, "Complete!");
        assert_eq!(dashboard.outer_bar().completed(), 3);
        assert_eq!(dashboard.inner_bar().total(), 7);
    }

    #[test]
    fn test_messages_trail_last_ten() {
        let dashboard = Dashboard::new();
        dashboard.start(1, 1);
        for i in 0..12 {
            dashboard.add_message(format!("message {}", i));
        }
        let view = dashboard.render();
        assert_eq!(dashboard.message_count(), 12);
        assert_eq!(view.log.len(), 10);
        assert_eq!(view.log[0].text, "message 2");
        assert_eq!(view.log[9].text, "message 11");
    }

    #[test]
    fn test_render_is_idempotent() {
        let dashboard = Dashboard::new();
        dashboard.start(5, 20);
        dashboard.advance_outer(2);
        dashboard.log(EntryKind::Outer, "Outer iteration 3/5");
        let now = Instant::now();
        assert_eq!(dashboard.render_at(now), dashboard.render_at(now));
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let dashboard = Dashboard::new();
        dashboard.start(5, 20);
        let start = dashboard.outer_bar().start_time();
        let mut last = Duration::ZERO;
        for secs in [0u64, 1, 1, 59, 60, 3599, 3600, 7200] {
            let elapsed = dashboard.render_at(start + Duration::from_secs(secs)).outer.elapsed;
            assert!(elapsed >= last);
            last = elapsed;
        }
    }

    #[test]
    fn test_clones_share_state() {
        let dashboard = Dashboard::new();
        let handle = dashboard.clone();
        dashboard.start(2, 2);
        handle.advance_outer(1);
        assert_eq!(dashboard.outer_bar().completed(), 1);
    }

    #[test]
    fn test_concurrent_updates_never_tear() {
        let dashboard = Dashboard::new();
        dashboard.start(1, 100);
        let writer = dashboard.clone();
        let handle = std::thread::spawn(move || {
            for step in 0..=100 {
                writer.advance_inner(step, (100 - step / 2).max(step));
            }
        });
        for _ in 0..200 {
            let bar = dashboard.inner_bar();
            assert!(bar.completed() <= bar.total());
        }
        handle.join().unwrap();
    }
}
