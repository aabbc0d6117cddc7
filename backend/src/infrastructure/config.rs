use std::path::PathBuf;

pub const DATABASE_VAR: &str = "WEBCMS_DATABASE";
pub const LOG_VAR: &str = "WEBCMS_LOG";
pub const SITE_NAME_VAR: &str = "WEBCMS_SITE_NAME";

const DEFAULT_DATABASE: &str = "pages.sqlite";
const DEFAULT_LOG: &str = "info";
const DEFAULT_SITE_NAME: &str = "WebCMS";

/// Runtime settings for the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file; `:memory:` opens a throwaway store
    pub database: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Site name stored on first start
    pub default_site_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_filter: DEFAULT_LOG.to_string(),
            default_site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = AppConfig::default();

        AppConfig {
            database: get(DATABASE_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            log_filter: get(LOG_VAR).unwrap_or(defaults.log_filter),
            default_site_name: get(SITE_NAME_VAR).unwrap_or(defaults.default_site_name),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database.as_os_str() == ":memory:"
    }
}
