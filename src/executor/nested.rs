//! Nested task executor.
//!
//! Runs the outer, middle and inner loops strictly in sequence, keeping the
//! dashboard and the run statistics in step with the work actually done.
//! The only suspension points are the simulated-work pause inside the inner
//! loop and the fixed pause after each middle iteration; both race the
//! cancellation token.

use std::time::Duration;

use chrono::Local;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::pacing::Pacer;
use super::random::RandomSource;
use crate::dashboard::{Dashboard, EntryKind};
use crate::domain::{RunConfig, RunStats};
use crate::error::Cancelled;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inner steps between progress log lines.
const PROGRESS_EVERY: usize = 5;

/// Drives the three-level workload against a dashboard.
pub struct NestedExecutor<R, P> {
    config: RunConfig,
    dashboard: Dashboard,
    rng: R,
    pacer: P,
    cancel: CancellationToken,
}

impl<R, P> NestedExecutor<R, P>
where
    R: RandomSource,
    P: Pacer,
{
    pub fn new(config: RunConfig, dashboard: Dashboard, rng: R, pacer: P, cancel: CancellationToken) -> Self {
        Self {
            config,
            dashboard,
            rng,
            pacer,
            cancel,
        }
    }

    /// Execute the whole workload.
    ///
    /// On cancellation `stats` holds exactly the work completed so far.
    pub async fn run(&mut self, stats: &mut RunStats) -> Result<(), Cancelled> {
        stats.add_message("TaskFlow execution initialized");
        stats.add_message(format!(
            "Configuration: outer={}, middle={}, inner={}",
            self.config.outer_iterations(),
            self.config.middle_iterations(),
            self.config.inner_iterations()
        ));

        self.outer_loop(stats).await
    }

    async fn outer_loop(&mut self, stats: &mut RunStats) -> Result<(), Cancelled> {
        let outer = self.config.outer_iterations();
        self.dashboard.log(EntryKind::Outer, "Starting outer loop execution");
        stats.add_message(format!("Execution started at {}", Local::now().format(TIMESTAMP_FORMAT)));
        info!("Executing {} outer iterations", outer);

        for i in 0..outer {
            self.dashboard
                .log(EntryKind::Outer, format!("Outer iteration {}/{}", i + 1, outer));
            stats.add_message(format!("Outer iteration {} started", i + 1));
            debug!("Outer iteration {}/{}", i + 1, outer);

            self.middle_loop(i, stats).await?;

            stats.total_outer += 1;
            self.dashboard.advance_outer(i + 1);
        }

        self.dashboard.complete_outer();
        self.dashboard.log(EntryKind::Success, "All loops completed successfully!");
        stats.add_message(format!("Execution completed at {}", Local::now().format(TIMESTAMP_FORMAT)));
        Ok(())
    }

    async fn middle_loop(&mut self, outer_idx: usize, stats: &mut RunStats) -> Result<(), Cancelled> {
        let middle = self.config.middle_iterations();
        self.dashboard
            .log(EntryKind::Middle, format!("Starting middle loop (outer={})", outer_idx));

        let total_inner_steps = self.config.inner_steps_per_outer();
        self.dashboard.reset_inner(total_inner_steps);

        let mut cumulative_inner = 0;
        for j in 0..middle {
            self.dashboard.log(
                EntryKind::Middle,
                format!("Middle iteration {}/{} (outer={})", j + 1, middle, outer_idx),
            );
            debug!("Middle iteration {}/{} (outer={})", j + 1, middle, outer_idx);

            let completed = self.inner_loop(outer_idx, j, stats).await?;
            cumulative_inner += completed;
            stats.total_middle += 1;

            // Short-circuits only ever lower the count below the precomputed maximum.
            debug_assert!(
                cumulative_inner <= total_inner_steps,
                "cumulative inner steps {} exceed planned {}",
                cumulative_inner,
                total_inner_steps
            );
            self.dashboard.advance_inner(cumulative_inner, total_inner_steps);

            self.pause(self.config.middle_pause()).await?;
        }

        self.dashboard.complete_inner(cumulative_inner);
        self.dashboard.log(
            EntryKind::Middle,
            format!(
                "Completed middle loop (outer={}, inner_steps={}/{})",
                outer_idx, cumulative_inner, total_inner_steps
            ),
        );
        Ok(())
    }

    /// Returns the number of inner steps completed, in `1..=inner_iterations`.
    async fn inner_loop(&mut self, outer_idx: usize, middle_idx: usize, stats: &mut RunStats) -> Result<usize, Cancelled> {
        let inner = self.config.inner_iterations();
        let probability = self.config.short_circuit_probability();
        self.dashboard.log(
            EntryKind::Inner,
            format!("Starting inner loop (outer={}, middle={})", outer_idx, middle_idx),
        );

        let mut completed = 0;
        for k in 0..inner {
            // The first step always runs
            if k > 0 && self.rng.next_unit() < probability {
                self.dashboard.log(
                    EntryKind::ShortCircuit,
                    format!(
                        "Short-circuit at inner iteration {} (outer={}, middle={})",
                        k, outer_idx, middle_idx
                    ),
                );
                stats.short_circuit_count += 1;
                stats.add_message(format!(
                    "Short-circuit at outer={}, middle={}, inner={}",
                    outer_idx, middle_idx, k
                ));
                debug!("Short-circuit at outer={}, middle={}, inner={}", outer_idx, middle_idx, k);
                break;
            }

            let secs = self.rng.uniform(self.config.sleep_min(), self.config.sleep_max());
            self.pause(Duration::from_secs_f64(secs)).await?;

            completed = k + 1;
            stats.total_inner += 1;

            if completed % PROGRESS_EVERY == 0 || completed == inner {
                self.dashboard.log(
                    EntryKind::Progress,
                    format!(
                        "Inner progress: {}/{} (outer={}, middle={})",
                        completed, inner, outer_idx, middle_idx
                    ),
                );
            }
        }

        Ok(completed)
    }

    async fn pause(&self, duration: Duration) -> Result<(), Cancelled> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Cancelled),
            _ = self.pacer.pause(duration) => Ok(()),
        }
    }
}
