//! Input handling
//!
//! Maps keyboard events to state transitions.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::AppState;

/// Handle an input event
pub fn handle_event(event: Event, state: &mut AppState) -> Result<()> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, state)
        }
        _ => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.show_help {
        return handle_help_input(key, state);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => state.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true
        }
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char(' ') | KeyCode::Enter => state.toggle_collapsed(),
        KeyCode::Char('t') | KeyCode::Char('T') => state.toggle_overlay(),
        KeyCode::Char('p') | KeyCode::Char('P') => state.toggle_sampling(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => state.increase_load(),
        KeyCode::Char('-') | KeyCode::Down => state.decrease_load(),
        KeyCode::Char('j') | KeyCode::Char('J') => state.inject_jank(),
        _ => {}
    }
    Ok(())
}

/// Handle input when help overlay is shown
fn handle_help_input(key: KeyEvent, state: &mut AppState) -> Result<()> {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => {
            state.show_help = false;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => state.should_quit = true,
        _ => {}
    }
    Ok(())
}
