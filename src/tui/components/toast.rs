//! Toast notification component
//!
//! A non-blocking overlay in the bottom-right corner that auto-dismisses.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const TOAST_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }

    /// Render on top of everything else, two cells in from the corner
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 cells padding + 2 border
        let width = (self.message.width() as u16 + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_toast_is_not_expired() {
        let toast = Toast::new("✓ Copied structure to clipboard");
        assert!(!toast.is_expired());
    }
}
