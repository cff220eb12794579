//! Live progress dashboard.
//!
//! This module provides:
//! - `Dashboard`: shared state for the outer and inner bars plus the activity log
//! - `DashboardView`: the display tree produced by `Dashboard::render`
//! - `format_time`: `HH:MM:SS` formatting of elapsed durations

mod activity;
mod bar;
mod clock;
mod renderer;
mod view;

pub use activity::{ActivityLog, EntryKind, LogEntry, VISIBLE_MESSAGES};
pub use bar::ProgressBarState;
pub use clock::format_time;
pub use renderer::Dashboard;
pub use view::{BarView, DashboardView};
