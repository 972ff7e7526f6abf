// TUI application state
//
// Owns the StructureViewer and the panels that present it. Loads and name
// listings run as background tasks and report back over channels; the
// viewer's tickets decide whether a late response is still wanted.

use super::components::{DetailPanel, LogsPanel, RequestBar, Toast, TreeAction, TreePanel};
use super::clipboard;
use super::theme::Theme;
use super::traits::{ComponentId, Copyable, Handled, Interactive};
use crate::client::{FetchError, StructureClient};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::structure::{LoadTicket, Snapshot, StructureRequest, StructureType, StructureViewer};
use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

/// A finished fetch on its way back to the event loop
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<Snapshot, FetchError>,
}

/// Page or component names fetched for the request bar
#[derive(Debug)]
pub struct NamesOutcome {
    pub structure_type: StructureType,
    pub result: Result<Vec<String>, FetchError>,
}

pub struct App {
    pub viewer: StructureViewer,

    pub request_bar: RequestBar,
    pub tree_panel: TreePanel,
    pub detail_panel: DetailPanel,
    pub logs_panel: LogsPanel,

    /// Which panel receives keyboard input
    pub focus: ComponentId,

    pub toast: Option<Toast>,
    pub theme: Theme,
    pub log_buffer: LogBuffer,

    pub should_quit: bool,

    /// Advanced on each tick (spinner)
    pub animation_frame: usize,

    client: StructureClient,
    load_tx: mpsc::Sender<LoadOutcome>,
    names_tx: mpsc::Sender<NamesOutcome>,
}

impl App {
    pub fn new(
        config: &Config,
        client: StructureClient,
        log_buffer: LogBuffer,
        load_tx: mpsc::Sender<LoadOutcome>,
        names_tx: mpsc::Sender<NamesOutcome>,
    ) -> Self {
        Self {
            viewer: StructureViewer::new(config.command_base.clone()),
            request_bar: RequestBar::new(),
            tree_panel: TreePanel::new(),
            detail_panel: DetailPanel::new(),
            logs_panel: LogsPanel::new(),
            focus: ComponentId::RequestBar,
            toast: None,
            theme: Theme::default(),
            log_buffer,
            should_quit: false,
            animation_frame: 0,
            client,
            load_tx,
            names_tx,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────

    /// Load whatever the request bar describes
    pub fn submit_request(&mut self) {
        match self.request_bar.build_request() {
            Ok(request) => {
                self.start_load(request);
                self.focus = ComponentId::Tree;
            }
            Err(e) => self.show_toast(format!("✗ {}", e)),
        }
    }

    /// Re-fetch the structure on screen (or the one being loaded)
    pub fn reload(&mut self) {
        match self.viewer.current_request().cloned() {
            Some(request) => self.start_load(request),
            None => self.submit_request(),
        }
    }

    /// Begin a load and fetch in the background. A newer load supersedes
    /// this one; its response is then discarded when it arrives.
    pub fn start_load(&mut self, request: StructureRequest) {
        self.request_bar.set(&request);
        self.request_names_if_needed();
        let ticket = self.viewer.begin_load(request);
        self.sync_panels();

        let client = self.client.clone();
        let tx = self.load_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(ticket.request()).await;
            if tx.send(LoadOutcome { ticket, result }).await.is_err() {
                tracing::debug!("Viewer closed before load finished");
            }
        });
    }

    pub fn on_load_finished(&mut self, outcome: LoadOutcome) {
        if self.viewer.finish_load(&outcome.ticket, outcome.result) {
            self.sync_panels();
        }
    }

    /// Fetch the request bar's name list if its type needs one
    pub fn request_names_if_needed(&mut self) {
        let Some(structure_type) = self.request_bar.take_names_request() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.names_tx.clone();
        tokio::spawn(async move {
            let result = client.list_names(structure_type).await;
            if tx.send(NamesOutcome { structure_type, result }).await.is_err() {
                tracing::debug!("Viewer closed before {} names arrived", structure_type);
            }
        });
    }

    pub fn on_names_loaded(&mut self, outcome: NamesOutcome) {
        if let Err(e) = &outcome.result {
            tracing::warn!("Could not list {} names: {}", outcome.structure_type, e);
        }
        if !self.request_bar.set_names(outcome.structure_type, outcome.result) {
            tracing::debug!("Dropping {} names: type changed", outcome.structure_type);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tree interaction
    // ─────────────────────────────────────────────────────────────────────

    pub fn apply_tree_action(&mut self, action: TreeAction) {
        match action {
            TreeAction::Select(address) => {
                if self.viewer.select(&address).is_none() {
                    tracing::debug!("Ignoring selection of {}", address);
                }
            }
            TreeAction::Toggle(address) => {
                self.viewer.toggle_expand(&address);
            }
            TreeAction::Expand(address) => self.viewer.expand(&address),
            TreeAction::Collapse(address) => self.viewer.collapse(&address),
            TreeAction::Deselect => self.viewer.deselect(),
        }
        self.sync_panels();
    }

    pub fn expand_all(&mut self) {
        self.viewer.expand_all();
        self.sync_panels();
    }

    pub fn collapse_all(&mut self) {
        self.viewer.collapse_all();
        self.sync_panels();
    }

    /// Push viewer state into the panels that mirror it
    pub fn sync_panels(&mut self) {
        self.tree_panel.sync(&self.viewer);
        self.detail_panel.set_detail(self.viewer.detail());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Focus and input routing
    // ─────────────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_focus();
    }

    /// Route a key to the focused panel. Tree keys that change viewer state
    /// become actions; the rest move the panel's own cursor or scroll.
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::RequestBar => {
                let handled = self.request_bar.handle_key(key);
                self.request_names_if_needed();
                handled
            }
            ComponentId::Tree => match self.tree_panel.action_for(key) {
                Some(action) => {
                    self.apply_tree_action(action);
                    Handled::Yes
                }
                None => self.tree_panel.handle_key(key),
            },
            ComponentId::Detail => self.detail_panel.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
        }
    }

    pub fn focus_hint(&self) -> &'static str {
        match self.focus {
            ComponentId::RequestBar => self.request_bar.focus_hint(),
            ComponentId::Tree => self.tree_panel.focus_hint(),
            ComponentId::Detail => self.detail_panel.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Clipboard and toasts
    // ─────────────────────────────────────────────────────────────────────

    /// `y`: the focused panel's content, or the whole structure from the tree
    pub fn copy_focused(&mut self) {
        let (text, what) = match self.focus {
            ComponentId::Detail => (self.detail_panel.copy_text(), self.detail_panel.copy_description()),
            ComponentId::Logs => (self.logs_panel.copy_text(), self.logs_panel.copy_description()),
            ComponentId::RequestBar | ComponentId::Tree => {
                (self.viewer.structure_json(), "structure JSON")
            }
        };

        match text {
            Some(text) => {
                let message = clipboard::copy_with_feedback(&text, what);
                self.show_toast(message);
            }
            None => self.show_toast("Nothing to copy"),
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Periodic tick: animation and toast expiry
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Address, LoadState};
    use crate::tui::components::NameChoices;
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;

    fn app_with_names() -> (App, mpsc::Receiver<LoadOutcome>, mpsc::Receiver<NamesOutcome>) {
        let config = Config::default();
        let client = StructureClient::new(&config).unwrap();
        let (load_tx, load_rx) = mpsc::channel(4);
        let (names_tx, names_rx) = mpsc::channel(4);
        let app = App::new(&config, client, LogBuffer::new(), load_tx, names_tx);
        (app, load_rx, names_rx)
    }

    fn app() -> (App, mpsc::Receiver<LoadOutcome>) {
        let (app, load_rx, _names_rx) = app_with_names();
        (app, load_rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn load_home(app: &mut App) {
        let request = StructureRequest::new(StructureType::Page, Some("home".into())).unwrap();
        app.viewer.load_snapshot(Snapshot::new(
            request,
            json!([{"tag": "ul", "children": [{"tag": "li"}, {"tag": "li"}]}]),
        ));
        app.sync_panels();
    }

    #[test]
    fn test_enter_on_tree_selects_and_fills_detail() {
        let (mut app, _rx) = app();
        load_home(&mut app);
        app.focus = ComponentId::Tree;

        assert!(app.dispatch_to_focused(key(KeyCode::Enter)).was_handled());
        assert_eq!(app.detail_panel.detail().unwrap().address, Address::new("0"));

        app.dispatch_to_focused(key(KeyCode::Esc));
        assert!(app.detail_panel.detail().is_none());
    }

    #[test]
    fn test_expand_and_collapse_all_resync_rows() {
        let (mut app, _rx) = app();
        load_home(&mut app);

        app.expand_all();
        assert_eq!(app.tree_panel.rows().len(), 3);

        app.collapse_all();
        assert_eq!(app.tree_panel.rows().len(), 1);
    }

    #[test]
    fn test_invalid_request_shows_toast() {
        let (mut app, _rx) = app();
        app.submit_request();
        assert!(app.toast.is_some());
        assert_eq!(app.viewer.state(), &LoadState::Idle);
    }

    #[tokio::test]
    async fn test_background_load_reports_failure() {
        let (mut app, mut rx) = app();
        for c in "home".chars() {
            app.dispatch_to_focused(key(KeyCode::Char(c)));
        }
        app.submit_request();
        assert!(app.viewer.is_loading());
        assert_eq!(app.focus, ComponentId::Tree);

        // Default config has no token, so the fetch fails without network
        let outcome = rx.recv().await.unwrap();
        app.on_load_finished(outcome);
        assert_eq!(
            app.viewer.state(),
            &LoadState::Failed("No authentication token".to_string())
        );
    }

    #[tokio::test]
    async fn test_superseded_load_is_ignored() {
        let (mut app, mut rx) = app();
        let menu = StructureRequest::new(StructureType::Menu, None).unwrap();
        let footer = StructureRequest::new(StructureType::Footer, None).unwrap();

        app.start_load(menu);
        app.start_load(footer);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let (stale, fresh) = if first.ticket.request().structure_type == StructureType::Menu {
            (first, second)
        } else {
            (second, first)
        };

        app.on_load_finished(stale);
        assert!(app.viewer.is_loading());

        app.on_load_finished(fresh);
        assert!(!app.viewer.is_loading());
    }

    #[tokio::test]
    async fn test_request_bar_fetches_names_on_type_change() {
        let (mut app, _rx, mut names_rx) = app_with_names();
        assert_eq!(app.focus, ComponentId::RequestBar);

        // Page -> Component: the new type's names are requested
        app.dispatch_to_focused(key(KeyCode::Right));
        assert_eq!(app.request_bar.choices(), &NameChoices::Loading);

        // Default config has no token, so the listing fails without network
        let outcome = names_rx.recv().await.unwrap();
        assert_eq!(outcome.structure_type, StructureType::Component);
        app.on_names_loaded(outcome);
        assert_eq!(
            app.request_bar.choices(),
            &NameChoices::Unavailable("No authentication token".to_string())
        );
    }

    #[test]
    fn test_names_for_abandoned_type_are_ignored() {
        let (mut app, _rx) = app();
        app.focus = ComponentId::Tree;
        let menu = StructureRequest::new(StructureType::Menu, None).unwrap();
        app.request_bar.set(&menu);

        app.on_names_loaded(NamesOutcome {
            structure_type: StructureType::Page,
            result: Ok(vec!["home".to_string()]),
        });
        assert_eq!(app.request_bar.choices(), &NameChoices::NotRequired);
    }
}
