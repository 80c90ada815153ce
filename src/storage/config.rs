use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "alert-events";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_WEB_APP_URL: &str = "https://script.google.com/macros/s/AKfycbxi3-Ga_QJD9uxlpodG9_3V_P2S0TBng6txzPLU8j8NK1oJZ37niRN8scc-zffwFTO7/exec";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// User settings. Keys missing from the file fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub web_app_url: String,
    pub team_key: String,
    pub sync_minutes: u32,
    pub lead_days: u32,
    pub notifications_enabled: bool,
    pub weather_lat: f64,
    pub weather_lon: f64,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            web_app_url: DEFAULT_WEB_APP_URL.to_string(),
            team_key: String::new(),
            sync_minutes: 10,
            lead_days: 1,
            notifications_enabled: false,
            weather_lat: 26.6168,
            weather_lon: -80.0684,
            theme: "default".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::from)
    }
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings, ConfigError>;

    fn save(&self, settings: &Settings) -> Result<(), ConfigError>;

    /// Stores a new theme name, leaving every other stored key as it was.
    fn save_theme(&self, theme: &str) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        settings.theme = theme.to_string();
        self.save(&settings)?;
        Ok(settings)
    }
}

/// Keeps settings in a TOML file, writing defaults the first time it is read.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        Self::new(config_dir().join(CONFIG_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings, ConfigError> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            Settings::from_toml(&content)
        } else {
            tracing::info!("No settings at {}, writing defaults", self.path.display());
            let settings = Settings::default();
            self.save(&settings)?;
            Ok(settings)
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, settings.to_toml()?)?;
        Ok(())
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
