//! Run reports.
//!
//! This module provides:
//! - `generate_report` / `save_report`: the persisted markdown artifact
//! - `display_summary`: the coloured console summary printed after a run

mod markdown;
mod summary;

pub use markdown::{RunStatus, generate_report, save_report};
pub use summary::{display_summary, summary_rows};
