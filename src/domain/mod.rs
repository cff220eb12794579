//! Domain types for a TaskFlow run.
//!
//! This module defines:
//! - `IterationBounds`: policy limits for the three loop levels
//! - `RunConfig`: validated, immutable configuration of one run
//! - `RunStats`: statistics accumulated by the executor

pub mod bounds;
pub mod run_config;
pub mod stats;

pub use bounds::IterationBounds;
pub use run_config::{RunConfig, RunConfigBuilder};
pub use stats::RunStats;
