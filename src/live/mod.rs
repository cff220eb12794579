//! Live display of the dashboard.
//!
//! This module provides:
//! - `LiveDisplay`: background repaint cycle with an `Idle → Running → Stopped` lifecycle
//! - `inline_terminal`: the stdout surface used outside of tests

mod driver;
mod terminal;

pub use driver::{DEFAULT_REFRESH_PER_SECOND, DriverPhase, LiveDisplay};
pub use terminal::{LiveTerminal, inline_terminal};
