//! System log strip
//!
//! Tails the in-memory log buffer. Follows new entries until the user
//! scrolls up.

use super::scrollbar::render_scrollbar;
use crate::logging::{LogBuffer, LogEntry};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// How many buffered entries the strip keeps around for scrolling
const TAIL_LEN: usize = 200;

pub struct LogsPanel {
    scroll: ScrollState,
    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            entries: Vec::new(),
        }
    }

    /// Pull the latest entries from the shared buffer (call each frame)
    pub fn sync(&mut self, buffer: &LogBuffer, viewport_height: usize) {
        self.entries = buffer.tail(TAIL_LEN);
        self.scroll
            .update_dimensions(self.entries.len(), viewport_height);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(ctx.theme.log_level_style(entry.level))
            })
            .collect();

        let title = if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(ctx.theme.border_type)
                .border_style(Style::default().fg(ctx.border_color(self.id())))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for LogsPanel {
    fn copy_text(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let (start, end) = self.scroll.visible_range();
        Some(
            self.entries[start..end]
                .iter()
                .map(format_log_entry)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn copy_description(&self) -> &'static str {
        "visible logs"
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key).into()
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:scroll  End:follow  y:copy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::Utc;

    fn buffer_with(n: usize) -> LogBuffer {
        let buffer = LogBuffer::new();
        for i in 0..n {
            buffer.add(LogEntry {
                timestamp: Utc::now(),
                level: LogLevel::Info,
                target: "structview".to_string(),
                message: format!("entry {}", i),
            });
        }
        buffer
    }

    #[test]
    fn test_follows_newest_entries() {
        let mut panel = LogsPanel::new();
        panel.sync(&buffer_with(10), 3);
        let copied = panel.copy_text().unwrap();
        assert!(copied.ends_with("entry 9"));
        assert_eq!(copied.lines().count(), 3);
    }

    #[test]
    fn test_empty_buffer_has_nothing_to_copy() {
        let mut panel = LogsPanel::new();
        panel.sync(&LogBuffer::new(), 3);
        assert_eq!(panel.copy_text(), None);
    }
}
