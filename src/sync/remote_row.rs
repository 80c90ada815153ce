//! Maps loosely shaped sheet rows onto [`Alert`] records.
//!
//! Each field has an ordered list of candidate header names. Headers are
//! compared lowercased and trimmed; the first candidate with a non-empty value
//! wins.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::alerts::alert::{Alert, DEFAULT_PRIORITY, SOURCE_SHEET};

const ID_KEYS: &[&str] = &["id"];
const DATE_KEYS: &[&str] = &["when", "date", "due date", "start date", "event date"];
const TIME_KEYS: &[&str] = &["time", "event time", "start time"];
const TITLE_KEYS: &[&str] = &["title", "event", "name", "subject", "action item", "action"];
const OWNER_KEYS: &[&str] = &["owner", "assigned to", "assignee"];
const CATEGORY_KEYS: &[&str] = &["category", "type"];
const STATUS_KEYS: &[&str] = &["status", "state"];
const PRIORITY_KEYS: &[&str] = &["priority"];
const NOTES_KEYS: &[&str] = &["notes", "description", "details", "summary"];

struct NormalizedRow<'a> {
    cells: Vec<(String, &'a Value)>,
}

impl<'a> NormalizedRow<'a> {
    fn new(row: &'a Map<String, Value>) -> Self {
        let cells = row
            .iter()
            .map(|(key, value)| (key.trim().to_lowercase(), value))
            .collect();
        Self { cells }
    }

    fn first_present(&self, candidates: &[&str]) -> Option<String> {
        candidates.iter().find_map(|candidate| {
            self.cells
                .iter()
                .filter(|(key, _)| key == candidate)
                .find_map(|(_, value)| cell_text(value))
        })
    }

    fn text(&self, candidates: &[&str]) -> String {
        self.first_present(candidates).unwrap_or_default()
    }
}

fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Converts one JSON row. Non-object rows yield `None`; rows without an id
/// get a fresh one so ids stay unique within the collection.
pub fn alert_from_row(row: &Value) -> Option<Alert> {
    let row = NormalizedRow::new(row.as_object()?);

    let id = row
        .first_present(ID_KEYS)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let priority = row
        .first_present(PRIORITY_KEYS)
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());

    Some(Alert {
        id,
        title: row.text(TITLE_KEYS),
        date: row.text(DATE_KEYS),
        time: row.text(TIME_KEYS),
        owner: row.text(OWNER_KEYS),
        category: row.text(CATEGORY_KEYS),
        status: row.text(STATUS_KEYS),
        priority,
        notes: row.text(NOTES_KEYS),
        source: SOURCE_SHEET.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn maps_canonical_row_verbatim() {
        let row = json!({
            "id": "r1",
            "when": "2024-06-10",
            "time": "09:30",
            "title": "Fire drill",
            "owner": "Jim Fryer",
            "category": "training ",
            "status": "Planned",
            "priority": "High",
            "notes": "Bring vests"
        });

        let alert = alert_from_row(&row).unwrap();

        assert_eq!(
            alert,
            Alert {
                id: "r1".to_string(),
                title: "Fire drill".to_string(),
                date: "2024-06-10".to_string(),
                time: "09:30".to_string(),
                owner: "Jim Fryer".to_string(),
                category: "training ".to_string(),
                status: "Planned".to_string(),
                priority: "High".to_string(),
                notes: "Bring vests".to_string(),
                source: "sheet".to_string(),
            }
        );
    }

    #[test]
    fn first_non_empty_candidate_wins() {
        let row = json!({
            "id": "r2",
            "when": "",
            "date": "6/10/2024",
            "Due Date": "2024-01-01",
            "Subject": "Quarterly audit",
        });

        let alert = alert_from_row(&row).unwrap();

        assert_eq!(alert.date, "6/10/2024");
        assert_eq!(alert.title, "Quarterly audit");
    }

    #[test]
    fn header_names_are_case_and_space_insensitive() {
        let row = json!({
            " Assigned To ": "Dana",
            "EVENT TIME": "2:00 pm",
            "Type": "Safety",
            "State": "In Progress",
            "Details": "Check extinguishers",
        });

        let alert = alert_from_row(&row).unwrap();

        assert_eq!(alert.owner, "Dana");
        assert_eq!(alert.time, "2:00 pm");
        assert_eq!(alert.category, "Safety");
        assert_eq!(alert.status, "In Progress");
        assert_eq!(alert.notes, "Check extinguishers");
    }

    #[test]
    fn missing_fields_become_empty_with_normal_priority() {
        let alert = alert_from_row(&json!({ "id": 42, "title": "Sparse" })).unwrap();

        assert_eq!(alert.id, "42");
        assert_eq!(alert.owner, "");
        assert_eq!(alert.category, "");
        assert_eq!(alert.priority, "Normal");
    }

    #[test]
    fn row_without_id_gets_generated_one() {
        let alert = alert_from_row(&json!({ "title": "No id" })).unwrap();

        assert!(Uuid::parse_str(&alert.id).is_ok());
    }

    #[test]
    fn non_object_rows_are_skipped() {
        assert_eq!(alert_from_row(&json!(["a", "b"])), None);
        assert_eq!(alert_from_row(&json!(null)), None);
    }
}
