//! Component trait system for the TUI
//!
//! Panels declare their capabilities through traits instead of the App
//! knowing how to render, scroll and copy for each one.
//!
//! ```text
//!                         App
//!          (routes keys, owns the StructureViewer)
//!                          │
//!        ┌────────────┬────┴───────┬────────────┐
//!        ▼            ▼            ▼            ▼
//!   RequestBar    TreePanel   DetailPanel   LogsPanel
//! ```
//!
//! - [`Component`] - identity + render
//! - [`Scrollable`] - content taller than the viewport
//! - [`Copyable`] - clipboard content
//! - [`Interactive`] - keyboard input

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
