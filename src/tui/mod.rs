//! Full-screen terminal interface for TaskFlow.
//!
//! This module provides the interactive report viewer:
//! - **ReportViewer**: scroll state and markdown styling for a report
//! - **ViewerRunner**: the render → event → update loop
//!
//! It also owns the colour palette shared with the live dashboard.

mod events;
mod runner;
mod viewer;

pub use events::KeyPoller;
pub use runner::{ViewerRunner, view_report};
pub use viewer::ReportViewer;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for full-screen mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Dashboard and viewer colours.
pub mod colors {
    use ratatui::style::Color;

    pub const TITLE: Color = Color::Magenta;
    pub const PANEL: Color = Color::LightBlue;
    pub const OUTER: Color = Color::Green;
    pub const INNER: Color = Color::Yellow;
    pub const COMPLETE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const TRACK: Color = Color::Rgb(58, 58, 58);
    pub const CLOCK: Color = Color::Cyan;
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const DIM: Color = Color::DarkGray;
}
