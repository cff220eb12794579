//! Viewer Runner - main event loop.
//!
//! The `ViewerRunner` owns the terminal, the viewer state and the key
//! poller. It runs the main loop: render → wait for a key → repeat.

use super::Tui;
use super::events::KeyPoller;
use super::viewer::ReportViewer;
use super::{init_terminal, restore_terminal};
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Main viewer runner that owns the event loop.
pub struct ViewerRunner {
    /// The terminal instance
    terminal: Tui,
    /// Scroll state and content
    viewer: ReportViewer,
    /// Key input source
    keys: KeyPoller,
}

impl ViewerRunner {
    /// Create a new viewer runner.
    pub fn new(terminal: Tui, viewer: ReportViewer) -> Self {
        Self {
            terminal,
            viewer,
            keys: KeyPoller::default(),
        }
    }

    /// Get a reference to the viewer.
    pub fn viewer(&self) -> &ReportViewer {
        &self.viewer
    }

    /// Run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting report viewer loop");

        loop {
            let viewer = &mut self.viewer;
            self.terminal.draw(|f| viewer.render(f))?;

            // No key means a timeout or resize; redraw either way
            let key = self.keys.next_key().await?;
            if key.is_some_and(|key| self.viewer.handle_key(key)) {
                break;
            }
        }

        info!("Report viewer loop ended");
        Ok(())
    }
}

/// Open `path` in the full-screen viewer, restoring the terminal on exit.
pub async fn view_report(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read report {}", path.display()))?;
    let title = path.display().to_string();

    let terminal = init_terminal().context("Failed to initialise terminal")?;
    let mut runner = ViewerRunner::new(terminal, ReportViewer::new(title, &content));
    let result = runner.run().await;

    if let Err(e) = restore_terminal() {
        warn!("Failed to restore terminal: {}", e);
    }
    result
}
