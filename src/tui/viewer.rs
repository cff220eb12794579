//! Report viewer state and rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::colors;

/// Scrollable view over a markdown report.
#[derive(Debug, Clone)]
pub struct ReportViewer {
    title: String,
    lines: Vec<String>,
    scroll: usize,
    viewport_height: usize,
    should_quit: bool,
}

impl ReportViewer {
    pub fn new(title: impl Into<String>, content: &str) -> Self {
        Self {
            title: title.into(),
            lines: content.lines().map(str::to_string).collect(),
            scroll: 0,
            viewport_height: 1,
            should_quit: false,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Last scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport_height);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport_height);
    }

    pub fn home(&mut self) {
        self.scroll = 0;
    }

    pub fn end(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Apply a key press. Returns true when the viewer should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.home(),
            KeyCode::End | KeyCode::Char('G') => self.end(),
            _ => {}
        }
        self.should_quit
    }

    /// Draw the viewer, resizing the scroll window to the frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        self.set_viewport_height(chunks[0].height.saturating_sub(2) as usize);

        let lines: Vec<Line> = self.lines.iter().map(|l| style_markdown(l)).collect();
        let body = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors::PANEL))
                    .title(Span::styled(
                        format!(" Report: {} ", self.title),
                        Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
                    )),
            )
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(body, chunks[0]);

        let position = if self.lines.is_empty() {
            "empty".to_string()
        } else {
            format!("line {}/{}", self.scroll + 1, self.lines.len())
        };
        let key = Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD);
        let footer = Line::from(vec![
            Span::styled(" q", key),
            Span::raw(" quit  "),
            Span::styled("↑/↓", key),
            Span::raw(" scroll  "),
            Span::styled("PgUp/PgDn", key),
            Span::raw(" page  "),
            Span::styled("g/G", key),
            Span::raw(" top/bottom  "),
            Span::styled(position, Style::default().fg(colors::DIM)),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }
}

/// Style one markdown source line for display.
fn style_markdown(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    if let Some(text) = trimmed.strip_prefix("# ") {
        Line::from(Span::styled(
            text,
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))
    } else if trimmed.starts_with("##") {
        let text = trimmed.trim_start_matches('#').trim_start();
        Line::from(Span::styled(
            text,
            Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
        ))
    } else if let Some(text) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
        Line::from(vec![Span::styled("  • ", Style::default().fg(Color::Yellow)), Span::raw(text)])
    } else if trimmed.starts_with('|') {
        Line::from(Span::styled(line, Style::default().fg(Color::White)))
    } else if trimmed.starts_with("---") {
        Line::from(Span::styled(line, Style::default().fg(colors::DIM)))
    } else if let Some(text) = trimmed.strip_prefix("> ") {
        Line::from(Span::styled(
            text,
            Style::default().fg(colors::DIM).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(line)
    }
}
