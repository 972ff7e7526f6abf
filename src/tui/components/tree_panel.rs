//! Structure tree panel
//!
//! Flattens the visual tree into terminal rows under the current expansion
//! state and keeps a cursor over them. Selecting and toggling are reported
//! back to the App as [`TreeAction`]s; the panel itself only moves the cursor.

use super::scrollbar::render_scrollbar;
use crate::structure::html::{EMPTY_MESSAGE, LOADING_MESSAGE};
use crate::structure::render::Label;
use crate::structure::{Address, LoadState, StructureViewer};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const IDLE_MESSAGE: &str = "Choose a structure type and press Enter";

/// One terminal row of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub address: Address,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub selected: bool,
    pub label: Label,
}

impl TreeRow {
    /// Expand/collapse marker; leaves get a spacer of the same width
    pub fn marker(&self) -> &'static str {
        match (self.has_children, self.expanded) {
            (true, true) => "▼ ",
            (true, false) => "▶ ",
            (false, _) => "  ",
        }
    }
}

/// What the user asked the viewer to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    Select(Address),
    Toggle(Address),
    Expand(Address),
    Collapse(Address),
    Deselect,
}

pub struct TreePanel {
    scroll: ScrollState,
    rows: Vec<TreeRow>,
    cursor: usize,
    has_selection: bool,
    title: String,
    /// Shown instead of rows when there are none
    placeholder: String,
    /// Failed reload on top of a retained tree
    error: Option<String>,
}

impl TreePanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            rows: Vec::new(),
            cursor: 0,
            has_selection: false,
            title: " Structure ".to_string(),
            placeholder: IDLE_MESSAGE.to_string(),
            error: None,
        }
    }

    /// Rebuild rows from the viewer, keeping the cursor on the same node
    /// when it is still visible
    pub fn sync(&mut self, viewer: &StructureViewer) {
        let previous = self.cursor_address().cloned();

        self.rows = match viewer.tree() {
            Some(tree) => tree
                .visible_rows(viewer.selection())
                .into_iter()
                .map(|row| TreeRow {
                    address: row.node.address.clone(),
                    depth: row.depth,
                    has_children: row.node.has_children,
                    expanded: row.expanded,
                    selected: viewer.selection().is_selected(&row.node.address),
                    label: row.node.label.clone(),
                })
                .collect(),
            None => Vec::new(),
        };
        self.has_selection = viewer.selection().selected().is_some();

        self.cursor = previous
            .and_then(|addr| self.rows.iter().position(|r| r.address == addr))
            .unwrap_or_else(|| self.cursor.min(self.rows.len().saturating_sub(1)));

        self.title = match viewer.title() {
            Some(title) => format!(" {} ", title),
            None => " Structure ".to_string(),
        };

        self.placeholder = match viewer.state() {
            LoadState::Idle => IDLE_MESSAGE.to_string(),
            LoadState::Loading => LOADING_MESSAGE.to_string(),
            LoadState::Failed(message) => message.clone(),
            LoadState::Loaded | LoadState::Empty => EMPTY_MESSAGE.to_string(),
        };

        self.error = match viewer.state() {
            LoadState::Failed(message) if !self.rows.is_empty() => Some(message.clone()),
            _ => None,
        };

        let total = self.rows.len();
        let viewport = self.scroll.viewport();
        self.scroll.update_dimensions(total, viewport);
        self.scroll.ensure_visible(self.cursor);
    }

    /// Call before rendering with the inner height of the panel
    pub fn update_viewport(&mut self, height: usize) {
        let height = if self.error.is_some() {
            height.saturating_sub(2)
        } else {
            height
        };
        self.scroll.update_dimensions(self.rows.len(), height);
        self.scroll.ensure_visible(self.cursor);
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_address(&self) -> Option<&Address> {
        self.rows.get(self.cursor).map(|r| &r.address)
    }

    /// Map a key to a viewer action for the row under the cursor
    pub fn action_for(&self, key: KeyEvent) -> Option<TreeAction> {
        if key.code == KeyCode::Esc {
            return self.has_selection.then_some(TreeAction::Deselect);
        }

        let row = self.rows.get(self.cursor)?;
        match key.code {
            KeyCode::Enter => Some(TreeAction::Select(row.address.clone())),
            KeyCode::Char(' ') if row.has_children => Some(TreeAction::Toggle(row.address.clone())),
            KeyCode::Right | KeyCode::Char('l') if row.has_children && !row.expanded => {
                Some(TreeAction::Expand(row.address.clone()))
            }
            KeyCode::Left | KeyCode::Char('h') if row.expanded => {
                Some(TreeAction::Collapse(row.address.clone()))
            }
            _ => None,
        }
    }

    fn move_to(&mut self, index: usize) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = index.min(self.rows.len() - 1);
        self.scroll.ensure_visible(self.cursor);
    }

    /// Nearest row above the cursor with a smaller depth
    fn parent_index(&self) -> Option<usize> {
        let depth = self.rows.get(self.cursor)?.depth;
        self.rows[..self.cursor].iter().rposition(|r| r.depth < depth)
    }

    fn first_child_index(&self) -> Option<usize> {
        let row = self.rows.get(self.cursor)?;
        let next = self.rows.get(self.cursor + 1)?;
        (row.expanded && next.depth > row.depth).then_some(self.cursor + 1)
    }

    fn row_line<'a>(&self, row: &'a TreeRow, is_cursor: bool, ctx: &RenderContext) -> Line<'a> {
        let theme = ctx.theme;
        let mut spans = vec![
            Span::raw("  ".repeat(row.depth)),
            Span::styled(row.marker(), Style::default().fg(theme.muted)),
        ];
        spans.extend(
            row.label
                .spans
                .iter()
                .map(|s| Span::styled(s.text.as_str(), theme.span_style(s.role))),
        );

        let mut line = Line::from(spans);
        if row.selected {
            line = line.style(
                Style::default()
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            );
        } else if is_cursor {
            line = line.style(Style::default().bg(theme.cursor));
        }
        line
    }
}

impl Default for TreePanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for TreePanel {
    fn id(&self) -> ComponentId {
        ComponentId::Tree
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(self.id());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(Span::styled(
                self.title.as_str(),
                Style::default().fg(ctx.theme.title),
            ));

        let inner = block.inner(area);
        f.render_widget(block, area);

        if self.rows.is_empty() {
            let style = if self.placeholder == IDLE_MESSAGE
                || self.placeholder == EMPTY_MESSAGE
                || self.placeholder == LOADING_MESSAGE
            {
                Style::default().fg(ctx.theme.muted)
            } else {
                Style::default().fg(ctx.theme.error)
            };
            let text = if self.placeholder == LOADING_MESSAGE {
                format!("{} {}", ctx.spinner_char(), self.placeholder)
            } else {
                self.placeholder.clone()
            };
            f.render_widget(
                Paragraph::new(text).style(style).wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let rows_area = if let Some(error) = &self.error {
            let [alert, rest] =
                Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
            f.render_widget(
                Paragraph::new(format!("✗ {}", error))
                    .style(Style::default().fg(ctx.theme.error)),
                alert,
            );
            rest
        } else {
            inner
        };

        let (start, end) = self.scroll.visible_range();
        let lines: Vec<Line> = self.rows[start..end]
            .iter()
            .enumerate()
            .map(|(i, row)| self.row_line(row, focused && start + i == self.cursor, ctx))
            .collect();

        f.render_widget(Paragraph::new(lines), rows_area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Scrollable for TreePanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for TreePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let page = self.scroll.viewport().max(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.rows.len().saturating_sub(1)),
            KeyCode::PageUp => self.move_to(self.cursor.saturating_sub(page)),
            KeyCode::PageDown => self.move_to(self.cursor + page),
            KeyCode::Left | KeyCode::Char('h') => match self.parent_index() {
                Some(parent) => self.move_to(parent),
                None => return Handled::No,
            },
            KeyCode::Right | KeyCode::Char('l') => match self.first_child_index() {
                Some(child) => self.move_to(child),
                None => return Handled::No,
            },
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:move  Enter:select  Space/←→:fold  Esc:deselect"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Snapshot, StructureRequest, StructureType};
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn viewer() -> StructureViewer {
        let mut viewer = StructureViewer::new("/admin/command");
        let request = StructureRequest::new(StructureType::Page, Some("home".into())).unwrap();
        viewer.load_snapshot(Snapshot::new(
            request,
            json!([{
                "tag": "div",
                "children": [
                    {"component": "Hero", "children": [{"text": "Welcome"}]},
                    {"textKey": "home.title"}
                ]
            }]),
        ));
        viewer
    }

    fn panel(viewer: &StructureViewer) -> TreePanel {
        let mut panel = TreePanel::new();
        panel.update_viewport(10);
        panel.sync(viewer);
        panel
    }

    #[test]
    fn test_rows_follow_expansion_state() {
        let mut viewer = viewer();
        let panel = panel(&viewer);
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.rows()[0].marker(), "▶ ");

        viewer.expand(&Address::new("0"));
        let panel = self::panel(&viewer);
        let addresses: Vec<_> = panel.rows().iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["0", "0.0", "0.1"]);
        assert_eq!(panel.rows()[2].marker(), "  ");
        assert_eq!(panel.rows()[1].depth, 1);
    }

    #[test]
    fn test_keys_map_to_actions_on_cursor_row() {
        let mut viewer = viewer();
        let panel = panel(&viewer);

        assert_eq!(
            panel.action_for(key(KeyCode::Enter)),
            Some(TreeAction::Select(Address::new("0")))
        );
        assert_eq!(
            panel.action_for(key(KeyCode::Right)),
            Some(TreeAction::Expand(Address::new("0")))
        );
        assert_eq!(panel.action_for(key(KeyCode::Left)), None);
        assert_eq!(panel.action_for(key(KeyCode::Esc)), None);

        viewer.select(&Address::new("0"));
        let panel = self::panel(&viewer);
        assert_eq!(panel.action_for(key(KeyCode::Esc)), Some(TreeAction::Deselect));
    }

    #[test]
    fn test_space_on_leaf_does_nothing() {
        let mut viewer = viewer();
        viewer.expand(&Address::new("0"));
        let mut panel = panel(&viewer);

        panel.handle_key(key(KeyCode::End));
        assert_eq!(panel.cursor_address(), Some(&Address::new("0.1")));
        assert_eq!(panel.action_for(key(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_left_moves_to_parent_and_right_to_first_child() {
        let mut viewer = viewer();
        viewer.expand(&Address::new("0"));
        let mut panel = panel(&viewer);

        assert!(panel.handle_key(key(KeyCode::Right)).was_handled());
        assert_eq!(panel.cursor_address(), Some(&Address::new("0.0")));

        panel.handle_key(key(KeyCode::Down));
        assert!(panel.handle_key(key(KeyCode::Left)).was_handled());
        assert_eq!(panel.cursor_address(), Some(&Address::new("0")));

        assert_eq!(panel.handle_key(key(KeyCode::Left)), Handled::No);
    }

    #[test]
    fn test_cursor_survives_resync() {
        let mut viewer = viewer();
        viewer.expand(&Address::new("0"));
        let mut panel = panel(&viewer);
        panel.handle_key(key(KeyCode::End));

        viewer.select(&Address::new("0.1"));
        panel.sync(&viewer);
        assert_eq!(panel.cursor_address(), Some(&Address::new("0.1")));
        assert!(panel.rows()[2].selected);
    }

    #[test]
    fn test_placeholder_reflects_load_state() {
        let mut viewer = StructureViewer::new("/admin/command");
        let panel = panel(&viewer);
        assert!(panel.rows().is_empty());
        assert_eq!(panel.placeholder, IDLE_MESSAGE);

        let request = StructureRequest::new(StructureType::Menu, None).unwrap();
        viewer.begin_load(request);
        let panel = self::panel(&viewer);
        assert_eq!(panel.placeholder, LOADING_MESSAGE);
    }
}
