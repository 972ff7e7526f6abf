//! Scrollbar rendering helper shared by the scrolling panels

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Draw a thumb-only scrollbar on the right border of `area`, but only when
/// the content overflows the viewport
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);

    // ScrollbarState wants how far the content can scroll, not its length
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}
