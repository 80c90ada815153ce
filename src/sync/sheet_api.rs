use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::alerts::alert::{Alert, DEFAULT_PRIORITY};
use crate::sync::remote_row::alert_from_row;

// A plain-text body keeps the POST a "simple" request for the Apps Script endpoint.
const BODY_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("{0}")]
    Remote(String),
    #[error("{0}")]
    BadResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Upsert,
    Delete,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Upsert => "upsert",
            Action::Delete => "delete",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Action::List => "Failed to sync",
            Action::Upsert => "Save failed",
            Action::Delete => "Delete failed",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestEnvelope<'a> {
    team_key: &'a str,
    action: &'a str,
    payload: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    ok: bool,
    error: Option<String>,
    items: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct UpsertPayload<'a> {
    id: &'a str,
    when: &'a str,
    time: &'a str,
    title: &'a str,
    owner: &'a str,
    category: &'a str,
    status: &'a str,
    priority: &'a str,
    notes: &'a str,
}

impl<'a> UpsertPayload<'a> {
    fn from_alert(alert: &'a Alert) -> Self {
        let priority = if alert.priority.is_empty() {
            DEFAULT_PRIORITY
        } else {
            alert.priority.as_str()
        };

        Self {
            id: &alert.id,
            when: &alert.date,
            time: &alert.time,
            title: &alert.title,
            owner: &alert.owner,
            category: &alert.category,
            status: &alert.status,
            priority,
            notes: &alert.notes,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertsApi: Send + Sync {
    async fn list_alerts(&self) -> Result<Vec<Alert>, ApiError>;

    async fn upsert_alert(&self, alert: &Alert) -> Result<(), ApiError>;

    async fn delete_alert(&self, id: &str) -> Result<(), ApiError>;
}

/// Client for the Apps Script web app that fronts the team sheet.
pub struct AppsScriptClient {
    web_app_url: String,
    team_key: String,
    client: reqwest::Client,
}

impl AppsScriptClient {
    pub fn new(web_app_url: String, team_key: String) -> Self {
        Self {
            web_app_url,
            team_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn web_app_url(&self) -> &str {
        &self.web_app_url
    }

    async fn call(&self, action: Action, payload: Value) -> Result<ResponseEnvelope, ApiError> {
        let envelope = RequestEnvelope {
            team_key: &self.team_key,
            action: action.name(),
            payload,
        };
        let body = serde_json::to_string(&envelope)?;

        tracing::debug!("POST {} action={}", self.web_app_url, action.name());

        let response = self.client
            .post(&self.web_app_url)
            .header(CONTENT_TYPE, BODY_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::info!("{} response status: {}", action.name(), status);

        let parsed: ResponseEnvelope = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                tracing::error!("{} failed. Status: {}, Body: {}", action.name(), status, text);
                return Err(ApiError::RequestError(format!("Status {}: {}", status, text)));
            }
            Err(_) => {
                tracing::error!("{} returned a non-JSON body", action.name());
                let message = if text.trim().is_empty() { "Bad response".to_string() } else { text };
                return Err(ApiError::BadResponse(message));
            }
        };

        if !parsed.ok {
            let message = parsed
                .error
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| action.failure_message().to_string());
            tracing::warn!("{} rejected by sheet endpoint: {}", action.name(), message);
            return Err(ApiError::Remote(message));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl AlertsApi for AppsScriptClient {
    async fn list_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        let response = self.call(Action::List, Value::Object(Default::default())).await?;

        let rows = response.items.unwrap_or_default();
        let row_count = rows.len();
        let alerts: Vec<Alert> = rows.iter().filter_map(alert_from_row).collect();

        if alerts.len() != row_count {
            tracing::warn!("Skipped {} malformed rows", row_count - alerts.len());
        }
        tracing::info!("Fetched {} alerts", alerts.len());
        Ok(alerts)
    }

    async fn upsert_alert(&self, alert: &Alert) -> Result<(), ApiError> {
        let payload = serde_json::to_value(UpsertPayload::from_alert(alert))?;
        tracing::info!("Saving alert {}: {}", alert.id, alert.title);

        self.call(Action::Upsert, payload).await?;
        Ok(())
    }

    async fn delete_alert(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting alert {}", id);

        self.call(Action::Delete, serde_json::json!({ "id": id })).await?;
        Ok(())
    }
}
