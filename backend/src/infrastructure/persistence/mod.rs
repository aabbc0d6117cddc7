mod schema;
mod sqlite_page_repository;
mod sqlite_site_settings_repository;

pub use schema::{initialize_database, seed_site_name};
pub use sqlite_page_repository::SqlitePageRepository;
pub use sqlite_site_settings_repository::SqliteSiteSettingsRepository;
