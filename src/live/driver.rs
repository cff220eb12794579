//! Live display driver.
//!
//! `LiveDisplay` repaints the dashboard on a fixed cadence from a background
//! task, independent of when the executor mutates progress state. It only
//! ever reads the dashboard.
//!
//! Lifecycle: `Idle → Running → Stopped`. A stopped driver cannot be
//! restarted; build a new one per run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, warn};
use ratatui::{Terminal, backend::Backend, layout::Position};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::dashboard::Dashboard;
use crate::error::{Result, TaskflowError};

/// Default repaint rate.
pub const DEFAULT_REFRESH_PER_SECOND: u32 = 10;

/// Shortest repaint interval; `tokio::time::interval` rejects a zero period.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Driver lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
    Stopped,
}

struct RefreshTask<B: Backend> {
    shutdown: CancellationToken,
    handle: JoinHandle<Terminal<B>>,
}

/// Periodic painter of a `Dashboard` onto a terminal.
pub struct LiveDisplay<B: Backend> {
    dashboard: Dashboard,
    refresh: Duration,
    phase: DriverPhase,
    /// Present whenever the refresh task does not own it
    terminal: Option<Terminal<B>>,
    task: Option<RefreshTask<B>>,
    frames: Arc<AtomicU64>,
    faulted: Arc<AtomicBool>,
}

fn render_err(e: impl std::fmt::Display) -> TaskflowError {
    TaskflowError::Render(e.to_string())
}

impl<B> LiveDisplay<B>
where
    B: Backend + Send + 'static,
{
    pub fn new(terminal: Terminal<B>, dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            refresh: Duration::from_secs(1) / DEFAULT_REFRESH_PER_SECOND,
            phase: DriverPhase::Idle,
            terminal: Some(terminal),
            task: None,
            frames: Arc::new(AtomicU64::new(0)),
            faulted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the number of repaints per second, clamped to 1..=1000.
    pub fn with_refresh_rate(mut self, per_second: u32) -> Self {
        self.refresh = (Duration::from_secs(1) / per_second.max(1)).max(MIN_REFRESH_INTERVAL);
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Frames painted by the refresh task so far.
    pub fn frames_drawn(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// True once a repaint failed and the driver gave up painting.
    pub fn is_faulted(&self) -> bool {
        self.faulted.load(Ordering::SeqCst)
    }

    /// The terminal, while the refresh task is not holding it.
    pub fn terminal(&self) -> Option<&Terminal<B>> {
        self.terminal.as_ref()
    }

    /// Begin the periodic repaint cycle.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != DriverPhase::Idle {
            return Err(TaskflowError::InvalidState(format!(
                "live display cannot start from {:?}",
                self.phase
            )));
        }
        let terminal = self
            .terminal
            .take()
            .ok_or_else(|| TaskflowError::InvalidState("live display has no terminal".to_string()))?;

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(refresh_loop(
            terminal,
            self.dashboard.clone(),
            self.refresh,
            shutdown.clone(),
            Arc::clone(&self.frames),
            Arc::clone(&self.faulted),
        ));
        self.task = Some(RefreshTask { shutdown, handle });
        self.phase = DriverPhase::Running;
        debug!("Live display started ({:?} interval)", self.refresh);
        Ok(())
    }

    /// End the repaint cycle, paint the final frame and release the terminal.
    ///
    /// Stopping an already stopped driver is a no-op.
    pub async fn stop(&mut self) -> Result<()> {
        let task = match self.phase {
            DriverPhase::Idle => {
                return Err(TaskflowError::InvalidState("live display was never started".to_string()));
            }
            DriverPhase::Stopped => return Ok(()),
            DriverPhase::Running => self.task.take(),
        };
        self.phase = DriverPhase::Stopped;

        let Some(RefreshTask { shutdown, handle }) = task else {
            return Ok(());
        };
        shutdown.cancel();
        let mut terminal = handle
            .await
            .map_err(|e| TaskflowError::Render(format!("refresh task failed: {}", e)))?;

        let released = if self.is_faulted() {
            Ok(())
        } else {
            self.release(&mut terminal)
        };
        self.terminal = Some(terminal);
        debug!("Live display stopped after {} frames", self.frames_drawn());
        released
    }

    /// Paint the last frame and leave the cursor visible below it.
    fn release(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = self.dashboard.render();
        let area = terminal
            .draw(|f| f.render_widget(&view, f.area()))
            .map_err(render_err)?
            .area;
        terminal
            .set_cursor_position(Position::new(0, area.bottom().saturating_sub(1)))
            .map_err(render_err)?;
        terminal.show_cursor().map_err(render_err)?;
        Ok(())
    }
}

async fn refresh_loop<B: Backend>(
    mut terminal: Terminal<B>,
    dashboard: Dashboard,
    interval: Duration,
    shutdown: CancellationToken,
    frames: Arc<AtomicU64>,
    faulted: Arc<AtomicBool>,
) -> Terminal<B> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let view = dashboard.render();
                let drawn = terminal
                    .draw(|f| f.render_widget(&view, f.area()))
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                if let Err(reason) = drawn {
                    warn!("Live display stopped repainting: {}", reason);
                    faulted.store(true, Ordering::SeqCst);
                    shutdown.cancelled().await;
                    break;
                }
                frames.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    terminal
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::{ClearType, TestBackend, WindowSize};
    use ratatui::buffer::Cell;
    use ratatui::layout::Size;
    use std::io;
    use std::sync::atomic::AtomicUsize;

    fn display() -> (Dashboard, LiveDisplay<TestBackend>) {
        let dashboard = Dashboard::new();
        dashboard.start(3, 6);
        let terminal = Terminal::new(TestBackend::new(100, 18)).unwrap();
        let display = LiveDisplay::new(terminal, dashboard.clone());
        (dashboard, display)
    }

    fn screen(display: &LiveDisplay<TestBackend>) -> String {
        let terminal = display.terminal().unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_default_refresh_rate() {
        let (_, display) = display();
        assert_eq!(display.refresh_interval(), Duration::from_millis(100));
        assert_eq!(display.phase(), DriverPhase::Idle);
        let display = display.with_refresh_rate(0);
        assert_eq!(display.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_refresh_rate_never_reaches_zero_interval() {
        let (_, display) = display();
        let display = display.with_refresh_rate(u32::MAX);
        assert_eq!(display.refresh_interval(), Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_extreme_refresh_rate_still_runs() {
        let (_, display) = display();
        let mut display = display.with_refresh_rate(2_000_000_000);
        display.start().unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        display.stop().await.unwrap();
        assert!(display.frames_drawn() >= 1);
    }

    /// `TestBackend` whose `draw` fails once `fail_after` frames succeeded.
    struct FlakyBackend {
        inner: TestBackend,
        draws: Arc<AtomicUsize>,
        fail_after: usize,
    }

    impl Backend for FlakyBackend {
        type Error = io::Error;

        fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
        where
            I: Iterator<Item = (u16, u16, &'a Cell)>,
        {
            if self.draws.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
                return Err(io::Error::other("terminal went away"));
            }
            self.inner.draw(content).map_err(|never| match never {})
        }

        fn append_lines(&mut self, n: u16) -> io::Result<()> {
            self.inner.append_lines(n).map_err(|never| match never {})
        }

        fn hide_cursor(&mut self) -> io::Result<()> {
            self.inner.hide_cursor().map_err(|never| match never {})
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            self.inner.show_cursor().map_err(|never| match never {})
        }

        fn get_cursor_position(&mut self) -> io::Result<Position> {
            self.inner.get_cursor_position().map_err(|never| match never {})
        }

        fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
            self.inner.set_cursor_position(position).map_err(|never| match never {})
        }

        fn clear(&mut self) -> io::Result<()> {
            self.inner.clear().map_err(|never| match never {})
        }

        fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
            self.inner.clear_region(clear_type).map_err(|never| match never {})
        }

        fn size(&self) -> io::Result<Size> {
            self.inner.size().map_err(|never| match never {})
        }

        fn window_size(&mut self) -> io::Result<WindowSize> {
            self.inner.window_size().map_err(|never| match never {})
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush().map_err(|never| match never {})
        }
    }

    #[tokio::test]
    async fn test_rendering_fault_stops_repaints_without_stopping_progress() {
        let draws = Arc::new(AtomicUsize::new(0));
        let backend = FlakyBackend {
            inner: TestBackend::new(100, 18),
            draws: Arc::clone(&draws),
            fail_after: 2,
        };
        let dashboard = Dashboard::new();
        dashboard.start(3, 6);
        let mut display = LiveDisplay::new(Terminal::new(backend).unwrap(), dashboard.clone()).with_refresh_rate(20);

        display.start().unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(display.is_faulted());
        assert_eq!(display.frames_drawn(), 2);
        let attempts = draws.load(Ordering::SeqCst);
        assert_eq!(attempts, 3);

        // The executor side keeps mutating state while nothing repaints
        dashboard.advance_outer(2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(draws.load(Ordering::SeqCst), attempts);

        display.stop().await.unwrap();
        assert_eq!(display.phase(), DriverPhase::Stopped);
        assert_eq!(draws.load(Ordering::SeqCst), attempts);
        assert_eq!(dashboard.outer_bar().completed(), 2);
        assert!(display.terminal().is_some());
    }

    #[tokio::test]
    async fn test_start_and_stop_paint_frames() {
        let (dashboard, mut display) = display();
        display.start().unwrap();
        assert!(display.is_running());
        assert!(display.terminal().is_none());

        dashboard.add_message("hello from the executor");
        tokio::time::sleep(Duration::from_millis(250)).await;
        display.stop().await.unwrap();

        assert_eq!(display.phase(), DriverPhase::Stopped);
        assert!(display.frames_drawn() >= 1);
        assert!(!display.is_faulted());
        let content = screen(&display);
        assert!(content.contains("TaskFlow Execution"));
        assert!(content.contains("hello from the executor"));
    }

    #[tokio::test]
    async fn test_final_frame_reflects_latest_state() {
        let (dashboard, mut display) = display();
        display.start().unwrap();
        dashboard.advance_outer(3);
        dashboard.complete_outer();
        display.stop().await.unwrap();
        let content = screen(&display);
        assert!(content.contains("Complete!"));
        assert!(content.contains("100.0%"));
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let (_, mut display) = display();
        display.start().unwrap();
        let err = display.start().unwrap_err();
        assert!(matches!(err, TaskflowError::InvalidState(_)));
        display.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_before_start_is_rejected() {
        let (_, mut display) = display();
        assert!(matches!(display.stop().await, Err(TaskflowError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_final() {
        let (_, mut display) = display();
        display.start().unwrap();
        display.stop().await.unwrap();
        display.stop().await.unwrap();
        assert!(display.start().is_err());
        assert_eq!(display.phase(), DriverPhase::Stopped);
    }
}
