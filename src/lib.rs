//! TaskFlow - a nested task runner with live progress tracking
//!
//! TaskFlow drives three nested loops of simulated work. The inner loop may
//! short-circuit at random, and a terminal dashboard with two progress bars,
//! elapsed clocks and an activity log repaints on its own cadence while the
//! loops run.

pub mod dashboard;
pub mod domain;
pub mod error;
pub mod executor;
pub mod live;
pub mod report;
pub mod session;
pub mod splash;
pub mod tui;

pub use domain::{IterationBounds, RunConfig, RunStats};
pub use error::{Result, TaskflowError};
pub use session::{Session, run};
