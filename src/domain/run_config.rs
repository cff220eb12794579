//! Validated run configuration.
//!
//! A `RunConfig` can only be obtained from `RunConfigBuilder::build`, so
//! every value reaching the executor has already been checked against
//! `IterationBounds`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::bounds::IterationBounds;
use crate::error::{Result, TaskflowError};

pub const DEFAULT_OUTER: usize = 5;
pub const DEFAULT_MIDDLE: usize = 3;
pub const DEFAULT_INNER: usize = 10;
pub const DEFAULT_SHORT_CIRCUIT_PROBABILITY: f64 = 0.3;
pub const DEFAULT_SLEEP_MIN_SECS: f64 = 0.01;
pub const DEFAULT_SLEEP_MAX_SECS: f64 = 0.05;
pub const DEFAULT_REPORT_PATH: &str = "report.md";

/// Immutable configuration of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    outer_iterations: usize,
    middle_iterations: usize,
    inner_iterations: usize,
    short_circuit_probability: f64,
    sleep_min: f64,
    sleep_max: f64,
    report_path: PathBuf,
}

impl RunConfig {
    /// Start building a configuration from the default values.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    pub fn outer_iterations(&self) -> usize {
        self.outer_iterations
    }

    pub fn middle_iterations(&self) -> usize {
        self.middle_iterations
    }

    pub fn inner_iterations(&self) -> usize {
        self.inner_iterations
    }

    pub fn short_circuit_probability(&self) -> f64 {
        self.short_circuit_probability
    }

    /// Lower bound of the simulated work pause, in seconds.
    pub fn sleep_min(&self) -> f64 {
        self.sleep_min
    }

    /// Upper bound of the simulated work pause, in seconds.
    pub fn sleep_max(&self) -> f64 {
        self.sleep_max
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Upper bound on inner steps per outer iteration.
    pub fn inner_steps_per_outer(&self) -> usize {
        self.middle_iterations * self.inner_iterations
    }

    /// Fixed pause between middle iterations.
    pub fn middle_pause(&self) -> Duration {
        Duration::from_secs_f64(self.sleep_min)
    }
}

/// Builder for `RunConfig`; validation happens in `build`.
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    bounds: IterationBounds,
    outer_iterations: usize,
    middle_iterations: usize,
    inner_iterations: usize,
    short_circuit_probability: f64,
    sleep_min: f64,
    sleep_max: f64,
    report_path: PathBuf,
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self {
            bounds: IterationBounds::default(),
            outer_iterations: DEFAULT_OUTER,
            middle_iterations: DEFAULT_MIDDLE,
            inner_iterations: DEFAULT_INNER,
            short_circuit_probability: DEFAULT_SHORT_CIRCUIT_PROBABILITY,
            sleep_min: DEFAULT_SLEEP_MIN_SECS,
            sleep_max: DEFAULT_SLEEP_MAX_SECS,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl RunConfigBuilder {
    pub fn outer(mut self, n: usize) -> Self {
        self.outer_iterations = n;
        self
    }

    pub fn middle(mut self, n: usize) -> Self {
        self.middle_iterations = n;
        self
    }

    pub fn inner(mut self, n: usize) -> Self {
        self.inner_iterations = n;
        self
    }

    pub fn short_circuit_probability(mut self, p: f64) -> Self {
        self.short_circuit_probability = p;
        self
    }

    /// Set the simulated work pause range, in seconds.
    pub fn sleep_range(mut self, min: f64, max: f64) -> Self {
        self.sleep_min = min;
        self.sleep_max = max;
        self
    }

    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    /// Override the policy limits (tests only need this).
    pub fn bounds(mut self, bounds: IterationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<RunConfig> {
        let bounds = self.bounds;
        bounds
            .check("outer_iterations", self.outer_iterations, bounds.outer())
            .and_then(|_| bounds.check("middle_iterations", self.middle_iterations, bounds.middle()))
            .and_then(|_| bounds.check("inner_iterations", self.inner_iterations, bounds.inner()))
            .map_err(TaskflowError::InvalidConfig)?;

        let p = self.short_circuit_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(TaskflowError::InvalidConfig(format!(
                "short_circuit_probability must be between 0.0 and 1.0 (got {})",
                p
            )));
        }

        if !self.sleep_min.is_finite() || !self.sleep_max.is_finite() || self.sleep_min <= 0.0 {
            return Err(TaskflowError::InvalidConfig(format!(
                "sleep range must be positive and finite (got {}..{})",
                self.sleep_min, self.sleep_max
            )));
        }
        if self.sleep_min > self.sleep_max {
            return Err(TaskflowError::InvalidConfig(format!(
                "sleep_min ({}) must not exceed sleep_max ({})",
                self.sleep_min, self.sleep_max
            )));
        }

        let is_markdown = self
            .report_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if !is_markdown {
            return Err(TaskflowError::InvalidConfig(format!(
                "report file must have .md extension (got {})",
                self.report_path.display()
            )));
        }

        Ok(RunConfig {
            outer_iterations: self.outer_iterations,
            middle_iterations: self.middle_iterations,
            inner_iterations: self.inner_iterations,
            short_circuit_probability: p,
            sleep_min: self.sleep_min,
            sleep_max: self.sleep_max,
            report_path: self.report_path,
        })
    }
}
