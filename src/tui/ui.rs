// Screen layout
//
// ┌ Load ───────────────────────────────────────┐
// ├ Structure ─────────────────┬ Node ──────────┤
// │ tree rows                  │ detail fields  │
// ├ Logs ──────────────────────┴────────────────┤
// └ status ─────────────────────────────────────┘

use super::app::App;
use super::components::status_bar;
use super::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

const LOG_STRIP_HEIGHT: u16 = 6;

pub fn draw(f: &mut Frame, app: &mut App) {
    let [request_area, main_area, logs_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(LOG_STRIP_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let [tree_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(main_area);

    // Viewports are the panel areas minus their borders
    app.tree_panel
        .update_viewport(tree_area.height.saturating_sub(2) as usize);
    app.detail_panel
        .update_viewport(detail_area.height.saturating_sub(2) as usize);
    app.logs_panel
        .sync(&app.log_buffer, logs_area.height.saturating_sub(2) as usize);

    let ctx = RenderContext::new(&app.theme, app.focus, app.animation_frame);

    app.request_bar.render(f, request_area, &ctx);
    app.tree_panel.render(f, tree_area, &ctx);
    app.detail_panel.render(f, detail_area, &ctx);
    app.logs_panel.render(f, logs_area, &ctx);
    status_bar::render(f, status_area, app, &ctx);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
