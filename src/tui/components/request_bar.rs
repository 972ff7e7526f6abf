//! Structure request bar
//!
//! Picks the structure type and, for page/component, the name to load. Names
//! come from the backend's listings; the App fetches them whenever the type
//! changes. Typing a name by hand still works, for unlisted structures.

use crate::client::FetchError;
use crate::structure::{RequestError, StructureRequest, StructureType};
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Names offered for the selected type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameChoices {
    /// Menu and footer are loaded without a name
    NotRequired,
    /// Listing not requested yet
    Pending,
    Loading,
    Ready(Vec<String>),
    /// Listing failed; free typing only
    Unavailable(String),
}

pub struct RequestBar {
    structure_type: StructureType,
    name: String,
    choices: NameChoices,
    /// Index into `NameChoices::Ready` of the name shown, if it came from the list
    choice: Option<usize>,
}

impl RequestBar {
    pub fn new() -> Self {
        let structure_type = StructureType::ALL[0];
        Self {
            structure_type,
            name: String::new(),
            choices: choices_for(structure_type),
            choice: None,
        }
    }

    /// Pre-fill from a request (CLI arguments, or the last load)
    pub fn set(&mut self, request: &StructureRequest) {
        if request.structure_type != self.structure_type {
            self.set_type(request.structure_type);
        }
        self.name = request.name().unwrap_or_default().to_string();
        self.choice = self.position_of_name();
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choices(&self) -> &NameChoices {
        &self.choices
    }

    pub fn build_request(&self) -> Result<StructureRequest, RequestError> {
        let name = (!self.name.trim().is_empty()).then(|| self.name.clone());
        StructureRequest::new(self.structure_type, name)
    }

    /// Type whose names should be fetched now, marking the listing as in
    /// flight. `None` when nothing is needed.
    pub fn take_names_request(&mut self) -> Option<StructureType> {
        if self.choices != NameChoices::Pending {
            return None;
        }
        self.choices = NameChoices::Loading;
        Some(self.structure_type)
    }

    /// Apply a finished listing. Listings for a type no longer selected are
    /// dropped and `false` is returned.
    pub fn set_names(
        &mut self,
        structure_type: StructureType,
        result: Result<Vec<String>, FetchError>,
    ) -> bool {
        if structure_type != self.structure_type || self.choices != NameChoices::Loading {
            return false;
        }
        self.choices = match result {
            Ok(names) => NameChoices::Ready(names),
            Err(e) => NameChoices::Unavailable(e.to_string()),
        };
        self.choice = self.position_of_name();
        true
    }

    fn set_type(&mut self, structure_type: StructureType) {
        self.structure_type = structure_type;
        self.name.clear();
        self.choices = choices_for(structure_type);
        self.choice = None;
    }

    fn position_of_name(&self) -> Option<usize> {
        match &self.choices {
            NameChoices::Ready(names) => names.iter().position(|n| *n == self.name),
            _ => None,
        }
    }

    /// Step through the listed names; `forward` wraps past the end
    fn cycle_name(&mut self, forward: bool) -> bool {
        let NameChoices::Ready(names) = &self.choices else {
            return false;
        };
        if names.is_empty() {
            return false;
        }
        let len = names.len();
        let next = match (self.choice, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.name = names[next].clone();
        self.choice = Some(next);
        true
    }

    fn choice_status(&self) -> Option<String> {
        match &self.choices {
            NameChoices::NotRequired | NameChoices::Pending => None,
            NameChoices::Loading => Some("loading names…".to_string()),
            NameChoices::Ready(names) if names.is_empty() => Some("none listed".to_string()),
            NameChoices::Ready(names) => Some(match self.choice {
                Some(i) => format!("{}/{}", i + 1, names.len()),
                None => format!("{} listed", names.len()),
            }),
            NameChoices::Unavailable(_) => Some("names unavailable".to_string()),
        }
    }
}

fn choices_for(structure_type: StructureType) -> NameChoices {
    if structure_type.requires_name() {
        NameChoices::Pending
    } else {
        NameChoices::NotRequired
    }
}

impl Default for RequestBar {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for RequestBar {
    fn id(&self) -> ComponentId {
        ComponentId::RequestBar
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(self.id());
        let theme = ctx.theme;

        let mut spans = vec![Span::styled("Type ", Style::default().fg(theme.muted))];
        for ty in StructureType::ALL {
            let style = if ty == self.structure_type {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted)
            };
            spans.push(Span::styled(format!(" {} ", ty), style));
        }

        if self.structure_type.requires_name() {
            spans.push(Span::styled("   Name ", Style::default().fg(theme.muted)));
            spans.push(Span::styled(
                self.name.clone(),
                Style::default().fg(theme.foreground),
            ));
            if focused {
                spans.push(Span::styled(
                    "▏",
                    Style::default().fg(theme.highlight),
                ));
            }
            if let Some(status) = self.choice_status() {
                spans.push(Span::styled(
                    format!("  ({})", status),
                    Style::default().fg(theme.muted),
                ));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(" Load ");

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

impl Interactive for RequestBar {
    /// Enter is left to the App, which owns loading
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Left => self.set_type(self.structure_type.prev()),
            KeyCode::Right => self.set_type(self.structure_type.next()),
            KeyCode::Up => return self.cycle_name(false).into(),
            KeyCode::Down => return self.cycle_name(true).into(),
            KeyCode::Backspace => {
                self.name.pop();
                self.choice = self.position_of_name();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.name.clear();
                self.choice = None;
            }
            KeyCode::Char(c)
                if self.structure_type.requires_name()
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.name.push(c);
                self.choice = self.position_of_name();
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        "←→:type  ↑↓:name  type to enter  Enter:load"
    }
}
