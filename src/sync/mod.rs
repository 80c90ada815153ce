pub mod remote_row;
pub mod sheet_api;
pub mod sync_engine;
pub mod weather;

pub use sheet_api::{AlertsApi, ApiError, AppsScriptClient};
pub use sync_engine::{SyncEngine, SyncError};
pub use weather::{WeatherClient, WeatherError, WeatherReport};
