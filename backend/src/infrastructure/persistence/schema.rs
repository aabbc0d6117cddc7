use rusqlite::{params, Connection, Result};

/// Initialize the SQLite database with the required schema.
/// This function is idempotent and can be safely called multiple times.
pub fn initialize_database(conn: &Connection) -> Result<()> {
    // Enable foreign key constraints
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Create pages table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            creation_date TEXT NOT NULL,
            publication_date TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pages_author ON pages(author)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pages_publication ON pages(publication_date)",
        [],
    )?;

    // Create content blocks table; positions are unique within a page
    conn.execute(
        "CREATE TABLE IF NOT EXISTS content_blocks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('header', 'paragraph', 'image')),
            content TEXT NOT NULL,
            position INTEGER NOT NULL CHECK (position >= 0),
            FOREIGN KEY (page_id) REFERENCES pages(id) ON DELETE CASCADE,
            UNIQUE (page_id, position)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_blocks_page ON content_blocks(page_id)",
        [],
    )?;

    // Single-row table for site-wide settings
    conn.execute(
        "CREATE TABLE IF NOT EXISTS site_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            site_name TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Store `default_name` as the site name unless one is already set.
pub fn seed_site_name(conn: &Connection, default_name: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO site_settings (id, site_name) VALUES (1, ?1)",
        params![default_name],
    )?;
    Ok(())
}
