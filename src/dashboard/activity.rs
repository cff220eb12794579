//! Activity log shown under the progress bars.

/// Display limit of the activity log.
pub const VISIBLE_MESSAGES: usize = 10;

/// What produced a log entry; drives styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    #[default]
    Info,
    Outer,
    Middle,
    Inner,
    Progress,
    ShortCircuit,
    Success,
}

/// A single activity log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl LogEntry {
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Append-only message store; only the tail is displayed.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    visible: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_visible(VISIBLE_MESSAGES)
    }

    pub fn with_visible(visible: usize) -> Self {
        Self {
            entries: Vec::new(),
            visible: visible.max(1),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// The most recent entries, oldest first.
    pub fn tail(&self) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(self.visible);
        &self.entries[start..]
    }
}
