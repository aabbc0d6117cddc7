pub mod config;
pub mod logging;
pub mod persistence;

pub use config::AppConfig;
pub use logging::init_tracing;
pub use persistence::{SqlitePageRepository, SqliteSiteSettingsRepository};
