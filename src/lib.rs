pub mod alerts;
pub mod export;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod app;

pub use alerts::{Alert, AlertDraft, AlertView, ViewQuery, ViewStats};
pub use app::{AppState, Mode, SyncStatus};
pub use storage::config::Settings;

pub use input::{normal_mode, command_mode};
