//! Key input for the report viewer.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;

/// Waits for key presses without starving the async runtime.
///
/// A poll that times out, or sees a non-key event such as a resize,
/// yields `None` so the caller redraws and polls again.
#[derive(Debug, Clone, Copy)]
pub struct KeyPoller {
    timeout: Duration,
}

impl KeyPoller {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Next key press, or `None` when nothing arrived within the timeout.
    pub async fn next_key(&self) -> Result<Option<KeyEvent>> {
        let timeout = self.timeout;
        // crossterm polling blocks, keep it off the async workers
        let key = tokio::task::spawn_blocking(move || -> Result<Option<KeyEvent>> {
            if event::poll(timeout)? {
                Ok(key_press(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;
        Ok(key)
    }
}

impl Default for KeyPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Key presses only; releases and repeats are reported by some terminals.
fn key_press(event: CrosstermEvent) -> Option<KeyEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(KeyPoller::default().timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_key_press_passes_presses() {
        let press = key(KeyCode::Char('q'), KeyEventKind::Press);
        assert_eq!(key_press(CrosstermEvent::Key(press)), Some(press));
    }

    #[test]
    fn test_key_press_drops_releases_and_resizes() {
        let release = key(KeyCode::Char('q'), KeyEventKind::Release);
        assert_eq!(key_press(CrosstermEvent::Key(release)), None);
        assert_eq!(key_press(CrosstermEvent::Resize(80, 24)), None);
        assert_eq!(key_press(CrosstermEvent::FocusGained), None);
    }
}
