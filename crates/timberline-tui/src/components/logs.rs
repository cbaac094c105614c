//! Logs component - live table of records streamed from stdin
//!
//! Owns the record buffer, the cursor, and follow behavior. The buffer has
//! exactly one writer: the update loop feeding `apply`.

use crate::action::Action;
use crate::components::Component;
use crate::ingest::IngestEvent;
use crate::keymap::{self, UserAction};
use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use timberline_core::{LogRecord, Severity};

/// Ingestion stream status shown in the header
#[derive(Debug, Clone, PartialEq)]
enum StreamStatus {
    Live,
    Closed,
    Failed(String),
}

/// Live log table fed from the ingestion channel
pub struct LogsComponent {
    /// Decoded records in arrival order, append-only
    records: Vec<LogRecord>,
    /// Cursor over the table; always a valid index or None when empty
    table_state: TableState,
    /// Whether navigation keys move the cursor
    focused: bool,
    /// Whether the full keymap legend is shown
    help_expanded: bool,
    /// Ingestion stream status
    stream: StreamStatus,
    /// Malformed records dropped so far
    skipped: u64,
}

impl Default for LogsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl LogsComponent {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            table_state: TableState::default(),
            focused: true,
            help_expanded: false,
            stream: StreamStatus::Live,
            skipped: 0,
        }
    }

    /// Whether the view is pinned to the newest record.
    ///
    /// Derived from the cursor position, never stored: the cursor is on the
    /// last row, or the buffer is empty.
    fn following(&self) -> bool {
        self.records.is_empty()
            || self.table_state.selected() == Some(self.records.len() - 1)
    }

    /// Append a record, auto-following only if the cursor was on the last
    /// row before the append.
    fn push(&mut self, record: LogRecord) {
        let follow = self.following();
        self.records.push(record);
        if follow {
            self.table_state.select(Some(self.records.len() - 1));
        }
    }

    /// Apply one event from the ingestion channel.
    pub fn apply(&mut self, event: IngestEvent) {
        match event {
            IngestEvent::Record(record) => self.push(record),
            IngestEvent::Skipped(count) => self.skipped = count,
            IngestEvent::Closed => self.stream = StreamStatus::Closed,
            IngestEvent::Failed(message) => self.stream = StreamStatus::Failed(message),
        }
    }

    /// Move cursor up one row, clamped to the first row
    fn select_previous(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            self.table_state.select(Some(selected.saturating_sub(1)));
        }
    }

    /// Move cursor down one row, clamped to the last row
    fn select_next(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            let last = self.records.len() - 1;
            self.table_state.select(Some((selected + 1).min(last)));
        }
    }

    /// Level field of the row under the cursor
    fn selected_level(&self) -> Option<String> {
        self.table_state
            .selected()
            .and_then(|i| self.records.get(i))
            .map(|r| r.level.clone())
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let status = match &self.stream {
            StreamStatus::Live if self.following() => {
                Span::raw(" ● LIVE ").fg(Color::Green).bold()
            }
            StreamStatus::Live => Span::raw(" ○ PAUSED ").fg(Color::DarkGray),
            StreamStatus::Closed => Span::raw(" ■ CLOSED ").fg(Color::Yellow),
            StreamStatus::Failed(e) => {
                Span::raw(format!(" ✗ STREAM ERROR: {e} ")).fg(Color::Red)
            }
        };

        let mut spans = vec![
            Span::raw(" timberline ").bold().fg(Color::Cyan),
            status,
            Span::raw(format!("{} rows", self.records.len())).dim(),
        ];
        if self.skipped > 0 {
            spans.push(Span::raw("  "));
            spans.push(Span::raw(format!("({} skipped)", self.skipped)).fg(Color::Yellow));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.records.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let waiting =
                Paragraph::new(Line::from(Span::raw(" Waiting for records on stdin…").dim()));
            frame.render_widget(waiting, inner);
            return;
        }

        let rows: Vec<Row> = self
            .records
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.display_time()),
                    Cell::from(r.level.clone())
                        .style(Style::default().fg(severity_color(r.severity()))),
                    Cell::from(r.prefix.clone()),
                    Cell::from(r.file.clone()),
                    Cell::from(r.line.clone()),
                    Cell::from(r.message.clone()),
                ])
            })
            .collect();

        // Cursor highlight only reads as a cursor when navigation keys are
        // live; unfocused keeps the row position without the highlight
        let highlight = if self.focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),  // Time
                Constraint::Length(8),  // Level
                Constraint::Length(6),  // Prefix
                Constraint::Length(10), // File
                Constraint::Length(4),  // Line
                Constraint::Min(20),    // Message
            ],
        )
        .header(
            Row::new(["Time", "Level", "Prefix", "File", "Line", "Message"])
                .style(Style::default().add_modifier(Modifier::UNDERLINED).dim()),
        )
        .block(block)
        .row_highlight_style(highlight);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        let bindings: Vec<&keymap::Binding> = if self.help_expanded {
            keymap::full_help().collect()
        } else {
            keymap::short_help().collect()
        };
        for binding in bindings {
            spans.push(Span::raw(format!(" [{}]", binding.label)).fg(Color::Yellow));
            spans.push(Span::raw(format!(" {} ", binding.help)).dim());
        }

        let footer = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(footer, area);
    }
}

impl Component for LogsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let Some(action) = keymap::action_for(&key) else {
            // Unbound keys fall through to the table widget, which has no
            // free axes here: fixed columns, cursor-driven scroll
            return Ok(None);
        };
        match action {
            UserAction::Quit => Ok(Some(Action::Quit)),
            UserAction::ToggleFocus => {
                self.focused = !self.focused;
                Ok(None)
            }
            UserAction::ToggleHelp => {
                self.help_expanded = !self.help_expanded;
                Ok(None)
            }
            UserAction::Up => {
                if self.focused {
                    self.select_previous();
                }
                Ok(None)
            }
            UserAction::Down => {
                if self.focused {
                    self.select_next();
                }
                Ok(None)
            }
            UserAction::Select => Ok(self.selected_level().map(Action::Select)),
            UserAction::Left | UserAction::Right => Ok(None),
        }
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(2), // Help footer
        ])
        .split(area);

        self.draw_header(frame, layout[0]);
        self.draw_table(frame, layout[1]);
        self.draw_help(frame, layout[2]);

        Ok(())
    }
}

/// Row color for a classified level
fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Green,
        Severity::Debug => Color::DarkGray,
        Severity::Unknown => Color::White,
    }
}
