//! Display state toggles and key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nvim_watcher::display::{DisplaySettings, DisplayState, ViewMode};
use nvim_watcher::processes::SortKey;
use nvim_watcher::render::{handle_key, KeyAction};
use std::sync::Arc;

#[test]
fn starts_sorted_by_cpu_showing_children() {
    let state = DisplayState::new();
    assert_eq!(state.current_sort_key(), SortKey::Cpu);
    assert_eq!(state.current_view_mode(), ViewMode::Children);
}

#[test]
fn toggling_twice_restores_the_original_state() {
    let state = DisplayState::new();
    let before = state.settings();

    assert_eq!(state.toggle_sort(), SortKey::Memory);
    assert_eq!(state.toggle_view(), ViewMode::Parents);
    assert_eq!(
        state.settings(),
        DisplaySettings {
            sort: SortKey::Memory,
            view: ViewMode::Parents
        }
    );

    state.toggle_sort();
    state.toggle_view();
    assert_eq!(state.settings(), before);
}

#[test]
fn concurrent_toggles_are_not_lost() {
    let state = Arc::new(DisplayState::new());
    let writers: Vec<_> = (0..8)
        .map(|_| {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    state.toggle_sort();
                    state.toggle_view();
                }
            })
        })
        .collect();
    let reader = {
        let state = Arc::clone(&state);
        std::thread::spawn(move || {
            for _ in 0..1000 {
                let _ = state.settings();
            }
        })
    };
    for w in writers {
        w.join().unwrap();
    }
    reader.join().unwrap();

    // 8000 flips of each field: back where we started
    assert_eq!(state.settings(), DisplaySettings::default());
}

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn key_bindings() {
    let state = DisplayState::new();

    assert_eq!(handle_key(&state, press(KeyCode::Char('s'), KeyModifiers::NONE)), KeyAction::Continue);
    assert_eq!(state.current_sort_key(), SortKey::Memory);

    handle_key(&state, press(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(state.current_sort_key(), SortKey::Cpu);

    handle_key(&state, press(KeyCode::Char('n'), KeyModifiers::CONTROL));
    assert_eq!(state.current_view_mode(), ViewMode::Parents);

    handle_key(&state, press(KeyCode::Char('v'), KeyModifiers::NONE));
    assert_eq!(state.current_view_mode(), ViewMode::Children);

    // unbound keys change nothing
    handle_key(&state, press(KeyCode::Char('x'), KeyModifiers::NONE));
    assert_eq!(state.settings(), DisplaySettings::default());
}

#[test]
fn quit_keys() {
    let state = DisplayState::new();
    assert_eq!(handle_key(&state, press(KeyCode::Char('q'), KeyModifiers::NONE)), KeyAction::Quit);
    assert_eq!(handle_key(&state, press(KeyCode::Esc, KeyModifiers::NONE)), KeyAction::Quit);
    assert_eq!(handle_key(&state, press(KeyCode::Char('c'), KeyModifiers::CONTROL)), KeyAction::Quit);
    // plain `c` is not a quit
    assert_eq!(handle_key(&state, press(KeyCode::Char('c'), KeyModifiers::NONE)), KeyAction::Continue);
}

#[test]
fn key_releases_are_ignored() {
    let state = DisplayState::new();
    let mut release = press(KeyCode::Char('s'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    handle_key(&state, release);
    assert_eq!(state.current_sort_key(), SortKey::Cpu);
}
