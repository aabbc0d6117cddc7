use crate::application::repositories::{RepositoryError, RepositoryResult, SiteSettingsRepository};
use crate::domain::SiteName;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

/// SQLite-backed store for the single site settings row
pub struct SqliteSiteSettingsRepository {
    conn: Connection,
}

impl SqliteSiteSettingsRepository {
    pub fn new(conn: Connection) -> Self {
        SqliteSiteSettingsRepository { conn }
    }

    pub fn new_in_memory() -> SqliteResult<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::initialize_database(&conn)?;
        Ok(SqliteSiteSettingsRepository { conn })
    }

    /// Open the database at `path`, seeding `default_name` if no site name is stored yet
    pub fn new_with_path(
        path: impl AsRef<std::path::Path>,
        default_name: &str,
    ) -> SqliteResult<Self> {
        let conn = Connection::open(path)?;
        super::schema::initialize_database(&conn)?;
        super::schema::seed_site_name(&conn, default_name)?;
        Ok(SqliteSiteSettingsRepository { conn })
    }
}

impl SiteSettingsRepository for SqliteSiteSettingsRepository {
    fn get_site_name(&self) -> RepositoryResult<SiteName> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT site_name FROM site_settings WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| RepositoryError::Storage(format!("Database error: {}", e)))?;

        match name {
            Some(name) => SiteName::new(name)
                .map_err(|e| RepositoryError::Storage(format!("Corrupt site name: {}", e))),
            None => Err(RepositoryError::NotFound("site name".to_string())),
        }
    }

    fn set_site_name(&mut self, name: &SiteName) -> RepositoryResult<()> {
        self.conn
            .execute(
                "INSERT INTO site_settings (id, site_name) VALUES (1, ?1)
                 ON CONFLICT(id) DO UPDATE SET site_name = excluded.site_name",
                params![name.as_str()],
            )
            .map_err(|e| RepositoryError::Storage(format!("Database error: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unset_site_name_is_not_found() {
        let repo = SqliteSiteSettingsRepository::new_in_memory().unwrap();

        assert!(matches!(
            repo.get_site_name(),
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_then_get_site_name() {
        let mut repo = SqliteSiteSettingsRepository::new_in_memory().unwrap();

        repo.set_site_name(&SiteName::new("My Site").unwrap()).unwrap();
        repo.set_site_name(&SiteName::new("Renamed").unwrap()).unwrap();

        assert_eq!(repo.get_site_name().unwrap().as_str(), "Renamed");
    }

    #[test]
    fn test_file_database_seeds_default_once() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("site.sqlite");

        {
            let mut repo = SqliteSiteSettingsRepository::new_with_path(&db_path, "WebCMS").unwrap();
            assert_eq!(repo.get_site_name().unwrap().as_str(), "WebCMS");
            repo.set_site_name(&SiteName::new("Kept").unwrap()).unwrap();
        }

        let repo = SqliteSiteSettingsRepository::new_with_path(&db_path, "WebCMS").unwrap();
        assert_eq!(repo.get_site_name().unwrap().as_str(), "Kept");
    }
}
