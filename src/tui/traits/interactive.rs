//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or whether it
/// should fall through to the next layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// Request bar editing (captures text input while focused)
///    │
///    ▼
/// App global keys (q, r, y, E, C, Tab)
///    │ if not handled
///    ▼
/// Focused component (Interactive::handle_key)
/// ```
pub trait Interactive: Component {
    /// Returns `Handled::Yes` if the component consumed the event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints for the status bar while focused
    fn focus_hint(&self) -> &'static str;
}
