//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::tui::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identifies a panel for focus tracking and input routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Structure type + name input
    RequestBar,
    /// The structure tree
    Tree,
    /// Selected node details
    Detail,
    /// System log strip
    Logs,
}

impl ComponentId {
    /// Focus order for Tab
    const FOCUS_ORDER: [ComponentId; 4] = [
        ComponentId::RequestBar,
        ComponentId::Tree,
        ComponentId::Detail,
        ComponentId::Logs,
    ];

    pub fn next_focus(self) -> Self {
        let order = Self::FOCUS_ORDER;
        let idx = order.iter().position(|&c| c == self).unwrap_or(0);
        order[(idx + 1) % order.len()]
    }

    pub fn prev_focus(self) -> Self {
        let order = Self::FOCUS_ORDER;
        let idx = order.iter().position(|&c| c == self).unwrap_or(0);
        order[(idx + order.len() - 1) % order.len()]
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need, never the mutable App.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub focus: ComponentId,
    /// Animation frame counter (spinner while loading)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Border colour for a panel: highlighted when focused
    pub fn border_color(&self, id: ComponentId) -> ratatui::style::Color {
        if self.is_focused(id) {
            self.theme.highlight
        } else {
            self.theme.border
        }
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all UI components
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render into the given area
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut id = ComponentId::RequestBar;
        for _ in 0..4 {
            id = id.next_focus();
        }
        assert_eq!(id, ComponentId::RequestBar);

        assert_eq!(ComponentId::RequestBar.prev_focus(), ComponentId::Logs);
        assert_eq!(ComponentId::Tree.next_focus(), ComponentId::Detail);
    }
}
