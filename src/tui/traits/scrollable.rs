//! Scrollable trait for components with scrollable content

use super::Component;
use crate::tui::scroll::ScrollState;

/// Uniform scroll behaviour. Components own a `ScrollState` and expose it;
/// the navigation methods come for free.
pub trait Scrollable: Component {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    // ─────────────────────────────────────────────────────────────
    // Navigation - default implementations delegate to ScrollState
    // ─────────────────────────────────────────────────────────────

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }

    /// Handle the common scroll keys; returns whether the key was one of them
    fn handle_scroll_keys(&mut self, key: crossterm::event::KeyEvent) -> bool {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ => return false,
        }
        true
    }
}
