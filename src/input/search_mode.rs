use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

/// Edits the search text live; Enter keeps it, Esc clears it.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Enter => {
            state.mode = Mode::Normal;
        }
        KeyCode::Esc => {
            state.query.search.clear();
            state.mode = Mode::Normal;
            state.reset_selection();
        }
        KeyCode::Backspace => {
            state.query.search.pop();
            state.reset_selection();
        }
        KeyCode::Char(c) => {
            state.query.search.push(c);
            state.reset_selection();
        }
        _ => {}
    }
}
