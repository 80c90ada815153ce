use crossterm::event::KeyCode;
use crate::app::AppState;

/// Field editing inside the alert form. Enter and Esc belong to the session,
/// which saves or discards the draft.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(form) = state.alert_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Backspace => {
            form.active_value_mut().pop();
        }
        KeyCode::Char(c) => {
            form.active_value_mut().push(c);
            form.error = None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AlertForm, FormField};

    fn setup_state_with_form() -> AppState {
        let mut state = AppState::new();
        state.alert_form = Some(AlertForm::new("Test Alert".to_string()));
        state
    }

    #[test]
    fn tab_moves_to_next_field() {
        let mut state = setup_state_with_form();

        handle_key(KeyCode::Tab, &mut state);

        assert_eq!(state.alert_form.as_ref().unwrap().active_field, FormField::Time);
    }

    #[test]
    fn backtab_moves_to_previous_field() {
        let mut state = setup_state_with_form();
        state.alert_form.as_mut().unwrap().active_field = FormField::Title;

        handle_key(KeyCode::BackTab, &mut state);

        assert_eq!(state.alert_form.as_ref().unwrap().active_field, FormField::Time);
    }

    #[test]
    fn char_appends_to_active_field() {
        let mut state = setup_state_with_form();

        for c in "6/10/2024".chars() {
            handle_key(KeyCode::Char(c), &mut state);
        }

        assert_eq!(state.alert_form.as_ref().unwrap().draft.date, "6/10/2024");
    }

    #[test]
    fn backspace_removes_from_title() {
        let mut state = setup_state_with_form();
        state.alert_form.as_mut().unwrap().active_field = FormField::Title;

        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.alert_form.as_ref().unwrap().draft.title, "Test Aler");
    }

    #[test]
    fn typing_clears_validation_error() {
        let mut state = setup_state_with_form();
        state.alert_form.as_mut().unwrap().error = Some("Date is required".to_string());

        handle_key(KeyCode::Char('1'), &mut state);

        assert_eq!(state.alert_form.as_ref().unwrap().error, None);
    }

    #[test]
    fn keys_without_form_are_ignored() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('x'), &mut state);

        assert!(state.alert_form.is_none());
    }
}
