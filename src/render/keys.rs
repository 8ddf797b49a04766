//! Key bindings for the live view.

use crate::display::DisplayState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Apply one key press to the display state.
pub fn handle_key(state: &DisplayState, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        // Ctrl+M arrives as Enter on most terminals
        KeyCode::Enter | KeyCode::Char('s') => {
            let sort = state.toggle_sort();
            debug!(%sort, "sort toggled");
            KeyAction::Continue
        }
        KeyCode::Char('m') if ctrl => {
            let sort = state.toggle_sort();
            debug!(%sort, "sort toggled");
            KeyAction::Continue
        }
        KeyCode::Char('n') if ctrl => {
            let view = state.toggle_view();
            debug!(%view, "view toggled");
            KeyAction::Continue
        }
        KeyCode::Char('v') => {
            let view = state.toggle_view();
            debug!(%view, "view toggled");
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Read key events on a dedicated thread for the life of the program. A quit key (or a
/// failed read) sends on `quit` and ends the thread.
pub fn spawn_listener(state: Arc<DisplayState>, quit: UnboundedSender<()>) -> JoinHandle<()> {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if handle_key(&state, key) == KeyAction::Quit {
                    let _ = quit.send(());
                    return;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "key listener stopped");
                let _ = quit.send(());
                return;
            }
        }
    })
}
