//! Node detail panel
//!
//! Shows the selected node's fields and the two edit-command links.
use super::scrollbar::render_scrollbar;
use crate::structure::DetailView;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct DetailPanel {
    /// Manual scroll: the user controls the position
    scroll: ScrollState,
    detail: Option<DetailView>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            detail: None,
        }
    }

    /// Show a node's details. Scroll resets when a different node is shown.
    pub fn set_detail(&mut self, detail: Option<DetailView>) {
        let changed = self.detail.as_ref().map(|d| &d.address) != detail.as_ref().map(|d| &d.address);
        self.detail = detail;
        if changed {
            self.scroll.scroll_to_top();
        }
        let total = self.line_count();
        let viewport = self.scroll.viewport();
        self.scroll.update_dimensions(total, viewport);
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn update_viewport(&mut self, height: usize) {
        self.scroll.update_dimensions(self.line_count(), height);
    }

    fn line_count(&self) -> usize {
        self.lines(None).len()
    }

    /// Field lines: bold label, then the value (multi-line values indented)
    fn lines(&self, ctx: Option<&RenderContext>) -> Vec<Line<'static>> {
        let Some(detail) = &self.detail else {
            return vec![Line::from("Select a node to see its details")];
        };

        let (label_style, link_style, muted) = match ctx {
            Some(ctx) => (
                Style::default()
                    .fg(ctx.theme.title)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .fg(ctx.theme.highlight)
                    .add_modifier(Modifier::UNDERLINED),
                Style::default().fg(ctx.theme.muted),
            ),
            None => (Style::default(), Style::default(), Style::default()),
        };

        let mut lines = Vec::new();
        for (label, value) in detail.fields() {
            if value.contains('\n') {
                lines.push(Line::from(Span::styled(format!("{}:", label), label_style)));
                lines.extend(value.lines().map(|l| Line::from(format!("  {}", l))));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", label), label_style),
                    Span::raw(value),
                ]));
            }
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Edit This Node", label_style)));
        lines.push(Line::from(Span::styled(detail.edit_node_link.clone(), link_style)));
        lines.push(Line::from(Span::styled("Edit Full Structure", label_style)));
        lines.push(Line::from(Span::styled(
            detail.edit_structure_link.clone(),
            link_style,
        )));
        lines.push(Line::from(Span::styled("y: copy details", muted)));
        lines
    }
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for DetailPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Detail
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let title = match &self.detail {
            Some(detail) => format!(" Node {} ", detail.address),
            None => " Node Details ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(title);

        let paragraph = Paragraph::new(self.lines(Some(ctx)))
            .style(Style::default().fg(ctx.theme.foreground))
            .scroll((self.scroll.offset() as u16, 0))
            .block(block);

        f.render_widget(paragraph, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Scrollable for DetailPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for DetailPanel {
    fn copy_text(&self) -> Option<String> {
        self.detail.as_ref().map(DetailView::to_text)
    }

    fn copy_description(&self) -> &'static str {
        "node details"
    }
}

impl Interactive for DetailPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key).into()
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:scroll  y:copy details"
    }
}
