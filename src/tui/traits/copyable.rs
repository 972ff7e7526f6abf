//! Copyable trait for components that provide clipboard content

use super::Component;

/// When the user presses `y`, the focused component's `Copyable`
/// implementation decides what goes to the clipboard.
pub trait Copyable: Component {
    /// Human-readable text for the clipboard, `None` when there is nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// What was copied, for the toast
    fn copy_description(&self) -> &'static str;
}
