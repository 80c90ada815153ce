use chrono::{DateTime, Local, NaiveDate};

use crate::alerts::{
    build_view, distinct_categories, distinct_statuses, Alert, AlertDraft, AlertView, FacetFilter,
    ViewQuery,
};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Search,
    Insert,
    Command,
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Offline,
    Error(String),
}

pub struct AppState {
    pub mode: Mode,
    pub alerts: Vec<Alert>,
    pub query: ViewQuery,
    pub today: NaiveDate,
    pub selected_index: usize,
    pub sync_status: SyncStatus,
    pub last_sync: Option<DateTime<Local>>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub alert_form: Option<AlertForm>,
    pub delete_confirmation_id: Option<String>,
    pub weather_line: Option<String>,
    pub status_message: Option<String>,
    pub lead_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Time,
    Title,
    Owner,
    Category,
    Status,
    Priority,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Date,
        FormField::Time,
        FormField::Title,
        FormField::Owner,
        FormField::Category,
        FormField::Status,
        FormField::Priority,
        FormField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::Time => "Time",
            FormField::Title => "Title",
            FormField::Owner => "Owner",
            FormField::Category => "Category",
            FormField::Status => "Status",
            FormField::Priority => "Priority",
            FormField::Notes => "Notes",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Add/edit dialog state wrapping the draft being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertForm {
    pub draft: AlertDraft,
    pub active_field: FormField,
    pub error: Option<String>,
}

impl AlertForm {
    pub fn new(title: String) -> Self {
        let draft = AlertDraft {
            title,
            ..AlertDraft::new()
        };
        Self {
            draft,
            active_field: FormField::Date,
            error: None,
        }
    }

    pub fn for_alert(alert: &Alert) -> Self {
        Self {
            draft: AlertDraft::for_alert(alert),
            active_field: FormField::Title,
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing()
    }

    pub fn next_field(&mut self) {
        let next = (self.active_field.position() + 1) % FormField::ALL.len();
        self.active_field = FormField::ALL[next];
    }

    pub fn prev_field(&mut self) {
        let len = FormField::ALL.len();
        let prev = (self.active_field.position() + len - 1) % len;
        self.active_field = FormField::ALL[prev];
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.draft.date,
            FormField::Time => &self.draft.time,
            FormField::Title => &self.draft.title,
            FormField::Owner => &self.draft.owner,
            FormField::Category => &self.draft.category,
            FormField::Status => &self.draft.status,
            FormField::Priority => &self.draft.priority,
            FormField::Notes => &self.draft.notes,
        }
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Date => &mut self.draft.date,
            FormField::Time => &mut self.draft.time,
            FormField::Title => &mut self.draft.title,
            FormField::Owner => &mut self.draft.owner,
            FormField::Category => &mut self.draft.category,
            FormField::Status => &mut self.draft.status,
            FormField::Priority => &mut self.draft.priority,
            FormField::Notes => &mut self.draft.notes,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            alerts: Vec::new(),
            query: ViewQuery::default(),
            today: Local::now().date_naive(),
            selected_index: 0,
            sync_status: SyncStatus::Synced,
            last_sync: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            alert_form: None,
            delete_confirmation_id: None,
            weather_line: None,
            status_message: None,
            lead_days: 1,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn view(&self) -> AlertView<'_> {
        build_view(&self.alerts, &self.query, self.today)
    }

    /// Replaces the collection after a sync, keeping the selection in range.
    pub fn set_alerts(&mut self, alerts: Vec<Alert>) {
        self.alerts = alerts;
        self.last_sync = Some(Local::now());
        self.clamp_selection();
    }

    pub fn add_alert(&mut self, alert: Alert) {
        match self.alerts.iter_mut().find(|existing| existing.id == alert.id) {
            Some(existing) => *existing = alert,
            None => self.alerts.push(alert),
        }
    }

    pub fn remove_alert(&mut self, id: &str) {
        self.alerts.retain(|alert| alert.id != id);
        self.clamp_selection();
    }

    pub fn visible_count(&self) -> usize {
        self.view().ordered.len()
    }

    pub fn selected_alert(&self) -> Option<&Alert> {
        self.view().ordered.get(self.selected_index).map(|row| row.alert)
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    pub fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    pub fn cycle_category_filter(&mut self) {
        let choices = distinct_categories(&self.alerts);
        self.query.category = next_choice(&choices, &self.query.category);
        self.reset_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        let choices = distinct_statuses(&self.alerts);
        self.query.status = next_choice(&choices, &self.query.status);
        self.reset_selection();
    }
}

fn next_choice(choices: &[String], current: &FacetFilter) -> FacetFilter {
    let next = choices
        .iter()
        .position(|choice| choice == current.choice())
        .map(|pos| (pos + 1) % choices.len())
        .unwrap_or(0);

    choices
        .get(next)
        .map(|choice| FacetFilter::from_choice(choice))
        .unwrap_or_default()
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, date: &str, category: &str) -> Alert {
        Alert {
            id: id.to_string(),
            title: format!("Alert {}", id),
            date: date.to_string(),
            category: category.to_string(),
            ..Alert::default()
        }
    }

    fn app_with(alerts: Vec<Alert>) -> AppState {
        let mut app = AppState::new();
        app.today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        app.set_alerts(alerts);
        app
    }

    #[test]
    fn new_app_starts_in_normal_mode() {
        let app = AppState::new();
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn new_app_references_today() {
        let app = AppState::new();
        assert_eq!(app.today, Local::now().date_naive());
    }

    #[test]
    fn new_app_has_no_alerts() {
        let app = AppState::new();
        assert!(app.alerts.is_empty());
        assert_eq!(app.selected_alert(), None);
    }

    #[test]
    fn selection_follows_sorted_order() {
        let app = app_with(vec![alert("late", "2024-06-20", ""), alert("early", "2024-06-01", "")]);

        assert_eq!(app.selected_alert().map(|a| a.id.as_str()), Some("early"));
    }

    #[test]
    fn selection_stops_at_bounds() {
        let mut app = app_with(vec![alert("1", "2024-06-01", ""), alert("2", "2024-06-02", "")]);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);

        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn removing_last_row_clamps_selection() {
        let mut app = app_with(vec![alert("1", "2024-06-01", ""), alert("2", "2024-06-02", "")]);
        app.selected_index = 1;

        app.remove_alert("2");

        assert_eq!(app.selected_index, 0);
        assert_eq!(app.alerts.len(), 1);
    }

    #[test]
    fn add_alert_replaces_same_id() {
        let mut app = app_with(vec![alert("1", "2024-06-01", "")]);

        app.add_alert(alert("1", "2024-06-05", "Drill"));

        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].category, "Drill");
    }

    #[test]
    fn category_filter_cycles_through_choices_and_back_to_all() {
        let mut app = app_with(vec![alert("1", "", "Safety"), alert("2", "", "Admin")]);

        app.cycle_category_filter();
        assert_eq!(app.query.category, FacetFilter::Exact("Admin".to_string()));
        app.cycle_category_filter();
        assert_eq!(app.query.category, FacetFilter::Exact("Safety".to_string()));
        app.cycle_category_filter();
        assert_eq!(app.query.category, FacetFilter::All);
    }

    #[test]
    fn status_filter_resets_when_value_disappears() {
        let mut app = app_with(vec![alert("1", "", "")]);
        app.query.status = FacetFilter::Exact("Gone".to_string());

        app.cycle_status_filter();

        assert_eq!(app.query.status, FacetFilter::All);
    }

    #[test]
    fn form_fields_wrap_in_both_directions() {
        let mut form = AlertForm::new(String::new());
        assert_eq!(form.active_field, FormField::Date);

        form.prev_field();
        assert_eq!(form.active_field, FormField::Notes);

        form.next_field();
        form.next_field();
        assert_eq!(form.active_field, FormField::Time);
    }

    #[test]
    fn new_form_uses_draft_defaults() {
        let form = AlertForm::new("Drill".to_string());

        assert_eq!(form.value(FormField::Title), "Drill");
        assert_eq!(form.value(FormField::Time), "09:00");
        assert_eq!(form.value(FormField::Category), "General");
        assert!(!form.is_editing());
    }

    #[test]
    fn edit_form_targets_existing_alert() {
        let form = AlertForm::for_alert(&alert("abc", "2024-06-01", "Drill"));

        assert!(form.is_editing());
        assert_eq!(form.value(FormField::Priority), "Normal");
    }
}
