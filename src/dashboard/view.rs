//! Dashboard display tree.
//!
//! `DashboardView` is a snapshot produced by `Dashboard::render`. It holds
//! only owned, already-formatted values and implements ratatui's `Widget`,
//! so it can be drawn after the state lock has been released.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use super::activity::{EntryKind, LogEntry};
use super::bar::ProgressBarState;
use super::clock::format_time;
use crate::tui::colors;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAME_MS: u128 = 80;
const BAR_WIDTH: u16 = 40;
const PLACEHOLDER: &str = "Waiting for tasks...";

/// Rows taken by the title border and the progress panel.
const FIXED_ROWS: u16 = 2 + 4;

/// One formatted progress bar row.
#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub label: &'static str,
    pub ratio: f64,
    pub elapsed: Duration,
    pub elapsed_text: String,
    pub status: String,
    pub spinner: char,
    pub finished: bool,
}

impl BarView {
    pub fn from_state(label: &'static str, bar: &ProgressBarState, now: Instant) -> Self {
        let elapsed = bar.elapsed_at(now);
        let spinner = if bar.is_finished() {
            '✔'
        } else {
            SPINNER[(elapsed.as_millis() / SPINNER_FRAME_MS) as usize % SPINNER.len()]
        };
        Self {
            label,
            ratio: bar.ratio().clamp(0.0, 1.0),
            elapsed,
            elapsed_text: format_time(elapsed),
            status: bar.status_label(),
            spinner,
            finished: bar.is_finished(),
        }
    }

    pub fn percent_text(&self) -> String {
        format!("{:>6.1}%", self.ratio * 100.0)
    }

    fn render_row(&self, area: Rect, buf: &mut Buffer, accent: Color, label_color: Color) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(11),
                Constraint::Length(BAR_WIDTH),
                Constraint::Length(8),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(self.spinner.to_string(), Style::default().fg(accent))).render(cols[0], buf);
        Paragraph::new(Span::styled(
            self.label,
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ))
        .render(cols[1], buf);

        let fill = if self.finished { colors::COMPLETE } else { accent };
        Gauge::default()
            .gauge_style(Style::default().fg(fill).bg(colors::TRACK))
            .use_unicode(true)
            .ratio(self.ratio)
            .label("")
            .render(cols[2], buf);

        Paragraph::new(Span::raw(self.percent_text())).render(cols[3], buf);
        Paragraph::new(Line::from(vec![
            Span::raw(" • "),
            Span::styled(self.elapsed_text.clone(), Style::default().fg(colors::CLOCK)),
            Span::raw(" • "),
            Span::styled(self.status.clone(), Style::default().fg(colors::DIM)),
        ]))
        .render(cols[4], buf);
    }
}

/// Composite view: title panel around the progress panel and activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub outer: BarView,
    pub inner: BarView,
    /// Visible tail of the activity log, oldest first
    pub log: Vec<LogEntry>,
    pub log_lines: usize,
}

impl DashboardView {
    /// Rows needed to draw the whole view without clipping.
    pub fn height(&self) -> u16 {
        Self::height_for(self.log_lines)
    }

    pub fn height_for(log_lines: usize) -> u16 {
        let lines = u16::try_from(log_lines).unwrap_or(u16::MAX);
        FIXED_ROWS.saturating_add(lines).saturating_add(2)
    }

    fn log_lines(&self) -> Vec<Line<'_>> {
        let marker = Span::styled("  > ", Style::default().fg(colors::DIM));
        if self.log.is_empty() {
            return vec![Line::from(vec![
                marker,
                Span::styled(PLACEHOLDER, Style::default().fg(colors::DIM)),
            ])];
        }
        self.log
            .iter()
            .map(|entry| Line::from(vec![marker.clone(), Span::styled(entry.text.as_str(), entry_style(entry.kind))]))
            .collect()
    }
}

fn entry_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::Info => Style::default(),
        EntryKind::Outer => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        EntryKind::Middle => Style::default().fg(Color::Green),
        EntryKind::Inner => Style::default().fg(Color::Cyan),
        EntryKind::Progress => Style::default().fg(colors::DIM),
        EntryKind::ShortCircuit => Style::default().fg(Color::Yellow),
        EntryKind::Success => Style::default().fg(colors::COMPLETE).add_modifier(Modifier::BOLD),
    }
}

impl Widget for &DashboardView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::TITLE))
            .title(Span::styled(
                " TaskFlow Execution ",
                Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
            ));
        let body = frame.inner(area);
        frame.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(body);

        let progress = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::PANEL))
            .title(Span::styled(" Progress ", Style::default().add_modifier(Modifier::BOLD)));
        let bars = progress.inner(chunks[0]);
        progress.render(chunks[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(bars);
        self.outer.render_row(rows[0], buf, colors::OUTER, Color::Blue);
        self.inner.render_row(rows[1], buf, colors::INNER, Color::Yellow);

        Paragraph::new(self.log_lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors::DIM))
                    .title(Span::styled(" Activity Log ", Style::default().add_modifier(Modifier::BOLD))),
            )
            .render(chunks[1], buf);
    }
}
