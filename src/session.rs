//! Run session.
//!
//! A `Session` wires one validated `RunConfig` to a dashboard, a live
//! display, a random source, a pacer and a cancellation token, then drives
//! the executor to completion. `run` is the entry point for callers that
//! want the stock wiring: stdout inline viewport, real pauses, OS entropy
//! and Ctrl-C cancellation.

use std::time::Instant;

use log::{info, warn};
use ratatui::{Terminal, backend::Backend};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::dashboard::{Dashboard, DashboardView, VISIBLE_MESSAGES};
use crate::domain::{RunConfig, RunStats};
use crate::error::{Cancelled, Result, TaskflowError};
use crate::executor::{NestedExecutor, Pacer, RandomSource, SeededRandom, TokioPacer};
use crate::live::{DEFAULT_REFRESH_PER_SECOND, LiveDisplay, inline_terminal};

/// One configured run, consumed by `Session::run`.
pub struct Session<R = SeededRandom, P = TokioPacer> {
    config: RunConfig,
    dashboard: Dashboard,
    log_lines: usize,
    rng: R,
    pacer: P,
    cancel: CancellationToken,
    refresh_per_second: u32,
}

impl Session {
    pub fn new(config: RunConfig) -> Self {
        Self::with_log_lines(config, VISIBLE_MESSAGES)
    }

    /// Session whose activity log shows the trailing `log_lines` messages.
    pub fn with_log_lines(config: RunConfig, log_lines: usize) -> Self {
        let log_lines = log_lines.max(1);
        Self {
            config,
            dashboard: Dashboard::with_log_lines(log_lines),
            log_lines,
            rng: SeededRandom::from_entropy(),
            pacer: TokioPacer,
            cancel: CancellationToken::new(),
            refresh_per_second: DEFAULT_REFRESH_PER_SECOND,
        }
    }
}

impl<R, P> Session<R, P>
where
    R: RandomSource,
    P: Pacer,
{
    pub fn with_random<R2: RandomSource>(self, rng: R2) -> Session<R2, P> {
        Session {
            config: self.config,
            dashboard: self.dashboard,
            log_lines: self.log_lines,
            rng,
            pacer: self.pacer,
            cancel: self.cancel,
            refresh_per_second: self.refresh_per_second,
        }
    }

    pub fn with_pacer<P2: Pacer>(self, pacer: P2) -> Session<R, P2> {
        Session {
            config: self.config,
            dashboard: self.dashboard,
            log_lines: self.log_lines,
            rng: self.rng,
            pacer,
            cancel: self.cancel,
            refresh_per_second: self.refresh_per_second,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_refresh_rate(mut self, per_second: u32) -> Self {
        self.refresh_per_second = per_second;
        self
    }

    /// Token that cancels this run when fired.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Rows the dashboard needs on screen.
    pub fn view_height(&self) -> u16 {
        DashboardView::height_for(self.log_lines)
    }

    /// Live display bound to this session's dashboard.
    pub fn live_display<B>(&self, terminal: Terminal<B>) -> LiveDisplay<B>
    where
        B: Backend + Send + 'static,
    {
        LiveDisplay::new(terminal, self.dashboard.clone()).with_refresh_rate(self.refresh_per_second)
    }

    /// Cancel the run on the first Ctrl-C. Abort the handle once the run ends.
    pub fn cancel_on_ctrl_c(&self) -> JoinHandle<()> {
        let token = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, cancelling run");
                token.cancel();
            }
        })
    }

    /// Execute the run while `display` repaints the dashboard.
    ///
    /// The display is stopped on every exit path. A cancelled run returns
    /// `TaskflowError::Cancelled` carrying the statistics gathered so far.
    pub async fn run<B>(self, display: &mut LiveDisplay<B>) -> Result<RunStats>
    where
        B: Backend + Send + 'static,
    {
        let Session {
            config,
            dashboard,
            rng,
            pacer,
            cancel,
            ..
        } = self;

        info!(
            "Run starting: outer={}, middle={}, inner={}, p={}",
            config.outer_iterations(),
            config.middle_iterations(),
            config.inner_iterations(),
            config.short_circuit_probability()
        );

        let started = Instant::now();
        dashboard.start(config.outer_iterations(), config.inner_steps_per_outer());
        display.start()?;

        let mut stats = RunStats::new();
        let mut executor = NestedExecutor::new(config, dashboard, rng, pacer, cancel);
        let outcome = executor.run(&mut stats).await;

        stats.total_elapsed_seconds = started.elapsed().as_secs_f64();
        stats.add_message(format!("Total elapsed time: {:.2} seconds", stats.total_elapsed_seconds));

        if let Err(e) = display.stop().await {
            warn!("Live display did not stop cleanly: {}", e);
        }

        match outcome {
            Ok(()) => {
                info!(
                    "Run finished in {:.2}s: {} inner steps, {} short-circuits",
                    stats.total_elapsed_seconds, stats.total_inner, stats.short_circuit_count
                );
                Ok(stats)
            }
            Err(Cancelled) => {
                info!("Run cancelled after {} outer iterations", stats.total_outer);
                Err(TaskflowError::Cancelled { stats: Box::new(stats) })
            }
        }
    }

    /// Run on an inline stdout viewport, cancelling on Ctrl-C.
    pub async fn run_inline(self) -> Result<RunStats> {
        let terminal = inline_terminal(self.view_height())?;
        let mut display = self.live_display(terminal);
        let interrupt = self.cancel_on_ctrl_c();
        let result = self.run(&mut display).await;
        interrupt.abort();
        result
    }
}

/// Run `config` with the stock wiring and return its statistics.
pub async fn run(config: RunConfig) -> Result<RunStats> {
    Session::new(config).run_inline().await
}
