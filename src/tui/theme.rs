// Colour theme for the TUI
//
// One resolved palette; panels read colours from here instead of
// hardcoding them. Label span roles map onto the tree colours.

use crate::logging::LogLevel;
use crate::structure::SpanRole;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Tree Label Colors ───────────────────────────────────
    pub component: Color,
    pub element: Color,
    pub attr_id: Color,
    pub attr_class: Color,
    pub translation: Color,
    pub text: Color,
    pub unknown: Color,
    pub address: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub error: Color,
    pub warning: Color,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,
    /// Cursor row that is not the selected node
    pub cursor: Color,

    pub muted: Color,

    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Dark".to_string(),
            component: Color::Rgb(198, 120, 221),
            element: Color::Rgb(97, 175, 239),
            attr_id: Color::Rgb(229, 192, 123),
            attr_class: Color::Rgb(152, 195, 121),
            translation: Color::Rgb(86, 182, 194),
            text: Color::Rgb(171, 178, 191),
            unknown: Color::Rgb(224, 108, 117),
            address: Color::Rgb(92, 99, 112),
            title: Color::Rgb(97, 175, 239),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(229, 192, 123),
            status_bar: Color::Rgb(171, 178, 191),
            error: Color::Rgb(224, 108, 117),
            warning: Color::Rgb(229, 192, 123),
            background: Color::Reset,
            foreground: Color::Rgb(220, 223, 228),
            selection: Color::Rgb(62, 68, 81),
            selection_fg: Color::Rgb(255, 255, 255),
            cursor: Color::Rgb(44, 49, 58),
            muted: Color::Rgb(92, 99, 112),
            border_type: BorderType::Rounded,
        }
    }
}

impl Theme {
    /// Style for one fragment of a tree label
    pub fn span_style(&self, role: SpanRole) -> Style {
        let style = Style::default();
        match role {
            SpanRole::Component => style.fg(self.component).add_modifier(Modifier::BOLD),
            SpanRole::Element => style.fg(self.element),
            SpanRole::AttrId => style.fg(self.attr_id),
            SpanRole::AttrClass => style.fg(self.attr_class),
            SpanRole::Translation => style.fg(self.translation).add_modifier(Modifier::ITALIC),
            SpanRole::Text => style.fg(self.text),
            SpanRole::Unknown => style.fg(self.unknown).add_modifier(Modifier::ITALIC),
            SpanRole::Address => style.fg(self.address).add_modifier(Modifier::DIM),
        }
    }

    pub fn log_level_style(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(self.error),
            LogLevel::Warn => Style::default().fg(self.warning),
            LogLevel::Info => Style::default().fg(self.foreground),
            LogLevel::Debug | LogLevel::Trace => Style::default().fg(self.muted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_and_element_are_distinguishable() {
        let theme = Theme::default();
        assert_ne!(
            theme.span_style(SpanRole::Component),
            theme.span_style(SpanRole::Element)
        );
        assert_ne!(
            theme.span_style(SpanRole::Translation),
            theme.span_style(SpanRole::Text)
        );
    }
}
