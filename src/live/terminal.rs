//! Terminal surface for the live dashboard.
//!
//! The dashboard draws into an inline viewport below the current cursor
//! line instead of taking over the screen, so the configuration block
//! printed before the run and the summary printed after it stay in the
//! scrollback.

use std::io::{Stdout, stdout};

use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend};

use crate::error::Result;

/// Terminal type the live dashboard paints to.
pub type LiveTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Create an inline terminal of `height` rows on stdout.
pub fn inline_terminal(height: u16) -> Result<LiveTerminal> {
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    Ok(terminal)
}
