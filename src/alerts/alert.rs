use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const SOURCE_LOCAL: &str = "local";
pub const SOURCE_SHEET: &str = "sheet";

pub const DEFAULT_TIME: &str = "09:00";
pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_STATUS: &str = "Planned";
pub const DEFAULT_PRIORITY: &str = "Normal";

/// A single team reminder as held in memory between syncs.
///
/// Text fields are kept verbatim; `date` stays raw so that an unparseable
/// value survives a round trip to the sheet untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub owner: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub notes: String,
    pub source: String,
}

impl Alert {
    pub fn priority_level(&self) -> Priority {
        Priority::classify(&self.priority)
    }

    pub fn status_tone(&self) -> StatusTone {
        StatusTone::classify(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn classify(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        if lowered.contains("crit") {
            Priority::Critical
        } else if lowered.contains("high") {
            Priority::High
        } else if lowered.contains("low") {
            Priority::Low
        } else {
            Priority::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "CRITICAL",
            Priority::High => "HIGH",
            Priority::Normal => "NORMAL",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Pending,
    InProgress,
    Done,
    Cancelled,
    Unclassified,
}

impl StatusTone {
    pub fn classify(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        if lowered.contains("pend") {
            StatusTone::Pending
        } else if lowered.contains("progress") {
            StatusTone::InProgress
        } else if lowered.contains("done") || lowered.contains("complete") {
            StatusTone::Done
        } else if lowered.contains("cancel") {
            StatusTone::Cancelled
        } else {
            StatusTone::Unclassified
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Date is required")]
    MissingDate,
}

/// Editable form state for creating or updating an alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub id: String,
    pub date: String,
    pub time: String,
    pub title: String,
    pub owner: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub notes: String,
}

impl AlertDraft {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            date: String::new(),
            time: DEFAULT_TIME.to_string(),
            title: String::new(),
            owner: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            status: DEFAULT_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            notes: String::new(),
        }
    }

    pub fn for_alert(alert: &Alert) -> Self {
        let priority = if alert.priority.is_empty() {
            DEFAULT_PRIORITY.to_string()
        } else {
            alert.priority.clone()
        };

        Self {
            id: alert.id.clone(),
            date: alert.date.clone(),
            time: alert.time.clone(),
            title: alert.title.clone(),
            owner: alert.owner.clone(),
            category: alert.category.clone(),
            status: alert.status.clone(),
            priority,
            notes: alert.notes.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.date.trim().is_empty() {
            return Err(DraftError::MissingDate);
        }
        Ok(())
    }

    /// Validates the draft and turns it into an alert, minting an id for new records.
    pub fn into_alert(self) -> Result<Alert, DraftError> {
        self.validate()?;

        let (id, source) = if self.id.is_empty() {
            (Uuid::new_v4().to_string(), SOURCE_LOCAL)
        } else {
            (self.id, SOURCE_SHEET)
        };

        Ok(Alert {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            owner: self.owner,
            category: self.category,
            status: self.status,
            priority: self.priority,
            notes: self.notes,
            source: source.to_string(),
        })
    }
}

impl Default for AlertDraft {
    fn default() -> Self {
        Self::new()
    }
}
