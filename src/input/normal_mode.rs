use crossterm::event::KeyCode;

use crate::app::{AlertForm, AppState, Mode};

/// Keys that only touch in-memory state. Quit, sync and export need the
/// terminal session and are handled there.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => state.move_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection_up(),
        KeyCode::Char('g') => state.reset_selection(),
        KeyCode::Char('G') => move_to_last(state),
        KeyCode::Char('/') => enter_search_mode(state),
        KeyCode::Char('c') => state.cycle_category_filter(),
        KeyCode::Char('s') => state.cycle_status_filter(),
        KeyCode::Char('a') => enter_insert_mode(state),
        KeyCode::Char('E') | KeyCode::Enter => enter_edit_mode(state),
        KeyCode::Char('x') => confirm_delete_selected(state),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => show_help(state),
        KeyCode::Esc => state.status_message = None,
        _ => {}
    }
}

fn move_to_last(state: &mut AppState) {
    state.selected_index = state.visible_count().saturating_sub(1);
}

fn enter_search_mode(state: &mut AppState) {
    state.mode = Mode::Search;
}

fn enter_insert_mode(state: &mut AppState) {
    state.alert_form = Some(AlertForm::new(String::new()));
    state.mode = Mode::Insert;
}

fn enter_edit_mode(state: &mut AppState) {
    if let Some(alert) = state.selected_alert() {
        state.alert_form = Some(AlertForm::for_alert(alert));
        state.mode = Mode::Insert;
    }
}

fn confirm_delete_selected(state: &mut AppState) {
    if let Some(alert) = state.selected_alert() {
        state.delete_confirmation_id = Some(alert.id.clone());
        state.mode = Mode::ConfirmDelete;
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

fn show_help(state: &mut AppState) {
    state.show_help = true;
    state.help_scroll = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::Alert;
    use crate::app::FormField;
    use chrono::NaiveDate;

    fn state_with_alerts() -> AppState {
        let mut state = AppState::new();
        state.today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        state.set_alerts(vec![
            Alert {
                id: "b".to_string(),
                title: "Second".to_string(),
                date: "2024-06-12".to_string(),
                category: "Drill".to_string(),
                ..Alert::default()
            },
            Alert {
                id: "a".to_string(),
                title: "First".to_string(),
                date: "2024-06-11".to_string(),
                ..Alert::default()
            },
        ]);
        state
    }

    #[test]
    fn j_key_moves_selection_down() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('j'), &mut state);

        assert_eq!(state.selected_alert().map(|a| a.id.as_str()), Some("b"));
    }

    #[test]
    fn k_key_at_top_stays() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('k'), &mut state);

        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn shift_g_jumps_to_last_row() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('G'), &mut state);

        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn slash_enters_search_mode() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('/'), &mut state);

        assert_eq!(state.mode, Mode::Search);
    }

    #[test]
    fn c_key_cycles_category() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('c'), &mut state);

        assert_eq!(state.query.category.choice(), "Drill");
        assert_eq!(state.visible_count(), 1);
    }

    #[test]
    fn a_key_enters_insert_mode_with_blank_form() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(state.mode, Mode::Insert);
        let form = state.alert_form.as_ref().unwrap();
        assert!(!form.is_editing());
        assert_eq!(form.active_field, FormField::Date);
    }

    #[test]
    fn enter_edits_selected_alert() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.alert_form.as_ref().unwrap().draft.id, "a");
    }

    #[test]
    fn edit_without_rows_does_nothing() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('E'), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.alert_form.is_none());
    }

    #[test]
    fn x_key_asks_for_confirmation() {
        let mut state = state_with_alerts();

        handle_key(KeyCode::Char('x'), &mut state);

        assert_eq!(state.mode, Mode::ConfirmDelete);
        assert_eq!(state.delete_confirmation_id.as_deref(), Some("a"));
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char(':'), &mut state);

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }

    #[test]
    fn question_mark_opens_help() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('?'), &mut state);

        assert!(state.show_help);
    }
}
