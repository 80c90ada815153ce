pub mod config;

pub use config::{ConfigError, FileSettingsStore, Settings, SettingsStore};
