// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop and restores the terminal on
// exit. The loop waits on keyboard input, a redraw tick, finished loads and
// name listings for the request bar.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::client::StructureClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::structure::StructureRequest;
use anyhow::{Context, Result};
use app::{App, LoadOutcome, NamesOutcome};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{ComponentId, Handled};

/// Run the TUI until the user quits. With `initial`, that structure starts
/// loading immediately.
pub async fn run_tui(
    config: Config,
    log_buffer: LogBuffer,
    initial: Option<StructureRequest>,
) -> Result<()> {
    let client = StructureClient::new(&config).context("Failed to create API client")?;
    let (load_tx, mut load_rx) = mpsc::channel(16);
    let (names_tx, mut names_rx) = mpsc::channel(4);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, client, log_buffer, load_tx, names_tx);
    if let Some(request) = initial {
        app.start_load(request);
        app.focus = ComponentId::Tree;
    }
    app.request_names_if_needed();

    let result = run_event_loop(&mut terminal, &mut app, &mut load_rx, &mut names_rx).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on four sources with `tokio::select!`:
/// 1. Keyboard/mouse input
/// 2. Redraw tick (spinner, toast expiry)
/// 3. Finished structure loads
/// 4. Name listings for the request bar
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    load_rx: &mut mpsc::Receiver<LoadOutcome>,
    names_rx: &mut mpsc::Receiver<NamesOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(outcome) = load_rx.recv() => {
                app.on_load_finished(outcome);
            }

            Some(outcome) = names_rx.recv() => {
                app.on_names_loaded(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered dispatch: request bar text entry → global keys → focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, even while typing a name
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.should_quit = true;
        return;
    }

    // Layer 1: the request bar owns printable keys while focused
    if app.focus == ComponentId::RequestBar && handle_request_bar_keys(app, &key_event) {
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: focused panel
    app.dispatch_to_focused(key_event);
}

fn handle_request_bar_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Enter => {
            app.submit_request();
            true
        }
        KeyCode::Esc => {
            app.focus = ComponentId::Tree;
            true
        }
        KeyCode::Tab => false,
        _ => app.dispatch_to_focused(*key_event).was_handled(),
    }
}

/// Returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('r') | KeyCode::F(5) => app.reload(),
        KeyCode::Char('y') => app.copy_focused(),
        KeyCode::Char('E') => app.expand_all(),
        KeyCode::Char('C') => app.collapse_all(),
        KeyCode::Char('/') => app.focus = ComponentId::RequestBar,
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        _ => return false,
    }
    true
}

/// Wheel scrolling goes to the focused panel as Up/Down
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let code = match mouse_event.kind {
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return,
    };
    if app.dispatch_to_focused(KeyEvent::new(code, KeyModifiers::NONE)) == Handled::No {
        tracing::trace!("Scroll ignored by {:?}", app.focus);
    }
}
