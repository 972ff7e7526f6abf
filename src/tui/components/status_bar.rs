// Status bar component
//
// Load state on the left, key hints for the focused panel on the right.

use crate::structure::LoadState;
use crate::tui::app::App;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

const GLOBAL_HINTS: &str = "Tab:focus  r:reload  E/C:expand/collapse all  y:copy  q:quit";

/// Left-hand status text for the current load state
pub fn status_text(app: &App, ctx: &RenderContext) -> String {
    match app.viewer.state() {
        LoadState::Idle => " Ready".to_string(),
        LoadState::Loading => match app.viewer.pending_request() {
            Some(request) => format!(" {} Loading {}", ctx.spinner_char(), request.title()),
            None => format!(" {} Loading", ctx.spinner_char()),
        },
        LoadState::Loaded => {
            let nodes = app
                .viewer
                .snapshot()
                .map(|s| s.forest.node_count())
                .unwrap_or(0);
            format!(" ✓ {} nodes", nodes)
        }
        LoadState::Empty => " Structure is empty".to_string(),
        LoadState::Failed(message) => format!(" ✗ {}", message),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App, ctx: &RenderContext) {
    let color = match app.viewer.state() {
        LoadState::Failed(_) => ctx.theme.error,
        _ => ctx.theme.status_bar,
    };

    let hints = format!("{}  │  {} ", app.focus_hint(), GLOBAL_HINTS);
    let [left, right] = Layout::horizontal([Constraint::Min(20), Constraint::Length(hints.chars().count() as u16)])
        .areas(area);

    f.render_widget(
        Paragraph::new(status_text(app, ctx)).style(Style::default().fg(color)),
        left,
    );
    f.render_widget(
        Paragraph::new(hints)
            .alignment(Alignment::Right)
            .style(Style::default().fg(ctx.theme.muted)),
        right,
    );
}
