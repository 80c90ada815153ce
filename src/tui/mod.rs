mod session;
mod presentation;
mod sample_alerts;
mod alert_table;
mod dialogs;

pub use session::run_tui;
