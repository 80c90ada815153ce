use std::time::Duration;

use crate::alerts::{Alert, AlertDraft, DraftError};
use crate::storage::config::Settings;
use crate::sync::sheet_api::{AlertsApi, ApiError, AppsScriptClient};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("{0}")]
    Validation(String),
}

impl From<DraftError> for SyncError {
    fn from(err: DraftError) -> Self {
        SyncError::Validation(err.to_string())
    }
}

pub struct SyncEngine<A: AlertsApi = AppsScriptClient> {
    settings: Settings,
    api: A,
}

impl SyncEngine<AppsScriptClient> {
    pub fn new(settings: Settings) -> Self {
        let api = AppsScriptClient::new(settings.web_app_url.clone(), settings.team_key.clone());
        Self { settings, api }
    }
}

impl<A: AlertsApi> SyncEngine<A> {
    pub fn with_api(settings: Settings, api: A) -> Self {
        Self { settings, api }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Time between background re-syncs, never shorter than one minute.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.settings.sync_minutes.max(1)) * 60)
    }

    pub async fn sync_now(&self) -> Result<Vec<Alert>, SyncError> {
        let alerts = self.api.list_alerts().await?;
        tracing::info!("Synced {} alerts", alerts.len());
        Ok(alerts)
    }

    pub async fn save(&self, draft: AlertDraft) -> Result<Alert, SyncError> {
        let alert = draft.into_alert()?;
        self.api.upsert_alert(&alert).await?;
        tracing::info!("Saved alert {}", alert.id);
        Ok(alert)
    }

    pub async fn delete(&self, id: &str) -> Result<(), SyncError> {
        if id.is_empty() {
            return Err(SyncError::Validation("Missing alert id".to_string()));
        }

        self.api.delete_alert(id).await?;
        tracing::info!("Deleted alert {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::sheet_api::MockAlertsApi;

    fn settings(sync_minutes: u32) -> Settings {
        Settings {
            sync_minutes,
            ..Settings::default()
        }
    }

    fn draft(id: &str) -> AlertDraft {
        AlertDraft {
            id: id.to_string(),
            title: "Fire drill".to_string(),
            date: "2024-06-10".to_string(),
            ..AlertDraft::new()
        }
    }

    #[test]
    fn sync_interval_uses_configured_minutes() {
        let engine = SyncEngine::with_api(settings(10), MockAlertsApi::new());
        assert_eq!(engine.sync_interval(), Duration::from_secs(600));
    }

    #[test]
    fn sync_interval_is_at_least_one_minute() {
        let engine = SyncEngine::with_api(settings(0), MockAlertsApi::new());
        assert_eq!(engine.sync_interval(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn sync_now_returns_listed_alerts() {
        let mut api = MockAlertsApi::new();
        api.expect_list_alerts().times(1).returning(|| {
            Ok(vec![Alert {
                id: "1".to_string(),
                ..Alert::default()
            }])
        });
        let engine = SyncEngine::with_api(settings(10), api);

        let alerts = engine.sync_now().await.unwrap();

        assert_eq!(alerts.len(), 1);
    }

    #[tokio::test]
    async fn sync_now_surfaces_remote_error() {
        let mut api = MockAlertsApi::new();
        api.expect_list_alerts()
            .returning(|| Err(ApiError::Remote("Failed to sync".to_string())));
        let engine = SyncEngine::with_api(settings(10), api);

        let err = engine.sync_now().await.unwrap_err();

        assert_eq!(err.to_string(), "API error: Failed to sync");
    }

    #[tokio::test]
    async fn save_new_draft_assigns_id_before_upsert() {
        let mut api = MockAlertsApi::new();
        api.expect_upsert_alert()
            .withf(|alert: &Alert| !alert.id.is_empty() && alert.source == "local")
            .times(1)
            .returning(|_| Ok(()));
        let engine = SyncEngine::with_api(settings(10), api);

        let saved = engine.save(draft("")).await.unwrap();

        assert!(uuid::Uuid::parse_str(&saved.id).is_ok());
        assert_eq!(saved.title, "Fire drill");
    }

    #[tokio::test]
    async fn save_existing_draft_keeps_id() {
        let mut api = MockAlertsApi::new();
        api.expect_upsert_alert()
            .withf(|alert: &Alert| alert.id == "abc")
            .times(1)
            .returning(|_| Ok(()));
        let engine = SyncEngine::with_api(settings(10), api);

        let saved = engine.save(draft("abc")).await.unwrap();

        assert_eq!(saved.id, "abc");
    }

    #[tokio::test]
    async fn save_rejects_draft_without_title() {
        let mut api = MockAlertsApi::new();
        api.expect_upsert_alert().never();
        let engine = SyncEngine::with_api(settings(10), api);
        let mut untitled = draft("");
        untitled.title = "   ".to_string();

        let err = engine.save(untitled).await.unwrap_err();

        assert!(matches!(err, SyncError::Validation(ref msg) if msg == "Title is required"));
    }

    #[tokio::test]
    async fn delete_forwards_id() {
        let mut api = MockAlertsApi::new();
        api.expect_delete_alert()
            .withf(|id: &str| id == "abc")
            .times(1)
            .returning(|_| Ok(()));
        let engine = SyncEngine::with_api(settings(10), api);

        engine.delete("abc").await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejects_empty_id() {
        let mut api = MockAlertsApi::new();
        api.expect_delete_alert().never();
        let engine = SyncEngine::with_api(settings(10), api);

        assert!(matches!(engine.delete("").await, Err(SyncError::Validation(_))));
    }
}
