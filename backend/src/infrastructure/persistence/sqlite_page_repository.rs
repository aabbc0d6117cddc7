use crate::application::repositories::{
    PageRepository, PageStore, RepositoryError, RepositoryResult, TransactionError,
};
use crate::domain::{
    AuthorName, BlockBody, BlockId, BlockKind, ContentBlock, PageId, PageMetadata, PageRecord,
    PageTitle,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};

type PageRow = (i64, String, String, NaiveDate, Option<NaiveDate>);
type BlockRow = (i64, String, String, i64);

fn db_error(e: rusqlite::Error) -> RepositoryError {
    RepositoryError::Storage(format!("Database error: {}", e))
}

fn corrupt(what: &str, e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(format!("Corrupt {} row: {}", what, e))
}

fn page_from_row(
    (id, title, author, creation_date, publication_date): PageRow,
) -> RepositoryResult<PageRecord> {
    let id = PageId::new(id).map_err(|e| corrupt("page", e))?;
    let metadata = PageMetadata {
        title: PageTitle::new(title).map_err(|e| corrupt("page", e))?,
        author: AuthorName::new(author).map_err(|e| corrupt("page", e))?,
        creation_date,
        publication_date,
    };
    Ok(PageRecord::new(id, metadata))
}

fn block_from_row(
    page_id: PageId,
    (id, kind, content, position): BlockRow,
) -> RepositoryResult<ContentBlock> {
    let id = BlockId::new(id).map_err(|e| corrupt("block", e))?;
    let kind: BlockKind = kind.parse().map_err(|e| corrupt("block", e))?;
    let body = BlockBody::new(kind, content).map_err(|e| corrupt("block", e))?;
    let position = usize::try_from(position).map_err(|e| corrupt("block", e))?;
    Ok(ContentBlock::new(id, page_id, body, position))
}

/// Page store over a borrowed connection, either the repository's own
/// connection or an open transaction
struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }

    fn insert_page(&self, metadata: &PageMetadata) -> RepositoryResult<PageId> {
        self.conn
            .execute(
                "INSERT INTO pages (title, author, creation_date, publication_date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    metadata.title.as_str(),
                    metadata.author.as_str(),
                    metadata.creation_date,
                    metadata.publication_date,
                ],
            )
            .map_err(db_error)?;

        PageId::new(self.conn.last_insert_rowid()).map_err(|e| corrupt("page", e))
    }

    fn get_page(&self, id: PageId) -> RepositoryResult<PageRecord> {
        let row: Option<PageRow> = self
            .conn
            .query_row(
                "SELECT id, title, author, creation_date, publication_date
                 FROM pages WHERE id = ?1",
                params![id.value()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()
            .map_err(db_error)?;

        match row {
            Some(row) => page_from_row(row),
            None => Err(RepositoryError::NotFound(format!("page {}", id))),
        }
    }

    fn list_pages(&self) -> RepositoryResult<Vec<PageRecord>> {
        // Published dates ascending, then drafts; ties broken by creation order
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, author, creation_date, publication_date
                 FROM pages
                 ORDER BY publication_date IS NULL, publication_date, id",
            )
            .map_err(db_error)?;

        let rows: Vec<PageRow> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })
            .map_err(db_error)?
            .collect::<SqliteResult<Vec<_>>>()
            .map_err(db_error)?;

        rows.into_iter().map(page_from_row).collect()
    }

    fn update_page_row(&self, id: PageId, metadata: &PageMetadata) -> RepositoryResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE pages
                 SET title = ?1, author = ?2, creation_date = ?3, publication_date = ?4
                 WHERE id = ?5",
                params![
                    metadata.title.as_str(),
                    metadata.author.as_str(),
                    metadata.creation_date,
                    metadata.publication_date,
                    id.value(),
                ],
            )
            .map_err(db_error)?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!("page {}", id)));
        }
        Ok(())
    }

    fn delete_page_row(&self, id: PageId) -> RepositoryResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM pages WHERE id = ?1", params![id.value()])
            .map_err(db_error)?;

        if changed == 0 {
            return Err(RepositoryError::NotFound(format!("page {}", id)));
        }
        Ok(())
    }

    fn insert_block(
        &self,
        page_id: PageId,
        position: usize,
        body: &BlockBody,
    ) -> RepositoryResult<ContentBlock> {
        self.conn
            .execute(
                "INSERT INTO content_blocks (page_id, kind, content, position)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    page_id.value(),
                    body.kind().as_str(),
                    body.content(),
                    position as i64,
                ],
            )
            .map_err(db_error)?;

        let id = BlockId::new(self.conn.last_insert_rowid()).map_err(|e| corrupt("block", e))?;
        Ok(ContentBlock::new(id, page_id, body.clone(), position))
    }

    fn list_blocks(&self, page_id: PageId) -> RepositoryResult<Vec<ContentBlock>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, kind, content, position
                 FROM content_blocks
                 WHERE page_id = ?1
                 ORDER BY position",
            )
            .map_err(db_error)?;

        let rows: Vec<BlockRow> = stmt
            .query_map(params![page_id.value()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(db_error)?
            .collect::<SqliteResult<Vec<_>>>()
            .map_err(db_error)?;

        rows.into_iter()
            .map(|row| block_from_row(page_id, row))
            .collect()
    }

    fn delete_blocks_for_page(&self, page_id: PageId) -> RepositoryResult<usize> {
        self.conn
            .execute(
                "DELETE FROM content_blocks WHERE page_id = ?1",
                params![page_id.value()],
            )
            .map_err(db_error)
    }
}

impl PageStore for SqliteStore<'_> {
    fn insert_page(&mut self, metadata: &PageMetadata) -> RepositoryResult<PageId> {
        SqliteStore::insert_page(self, metadata)
    }

    fn get_page(&self, id: PageId) -> RepositoryResult<PageRecord> {
        SqliteStore::get_page(self, id)
    }

    fn list_pages(&self) -> RepositoryResult<Vec<PageRecord>> {
        SqliteStore::list_pages(self)
    }

    fn update_page_row(&mut self, id: PageId, metadata: &PageMetadata) -> RepositoryResult<()> {
        SqliteStore::update_page_row(self, id, metadata)
    }

    fn delete_page_row(&mut self, id: PageId) -> RepositoryResult<()> {
        SqliteStore::delete_page_row(self, id)
    }

    fn insert_block(
        &mut self,
        page_id: PageId,
        position: usize,
        body: &BlockBody,
    ) -> RepositoryResult<ContentBlock> {
        SqliteStore::insert_block(self, page_id, position, body)
    }

    fn list_blocks(&self, page_id: PageId) -> RepositoryResult<Vec<ContentBlock>> {
        SqliteStore::list_blocks(self, page_id)
    }

    fn delete_blocks_for_page(&mut self, page_id: PageId) -> RepositoryResult<usize> {
        SqliteStore::delete_blocks_for_page(self, page_id)
    }
}

/// SQLite-based implementation of the PageRepository trait
pub struct SqlitePageRepository {
    conn: Connection,
}

impl SqlitePageRepository {
    /// Create a new SQLite repository with the given connection.
    /// The schema must already be initialized.
    pub fn new(conn: Connection) -> Self {
        SqlitePageRepository { conn }
    }

    /// Create a new in-memory SQLite repository (useful for testing)
    pub fn new_in_memory() -> SqliteResult<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::initialize_database(&conn)?;
        Ok(SqlitePageRepository { conn })
    }

    /// Create a new file-based SQLite repository
    pub fn new_with_path(path: impl AsRef<std::path::Path>) -> SqliteResult<Self> {
        let conn = Connection::open(path)?;
        super::schema::initialize_database(&conn)?;
        Ok(SqlitePageRepository { conn })
    }

    /// The underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn store(&self) -> SqliteStore<'_> {
        SqliteStore::new(&self.conn)
    }
}

impl PageStore for SqlitePageRepository {
    fn insert_page(&mut self, metadata: &PageMetadata) -> RepositoryResult<PageId> {
        self.store().insert_page(metadata)
    }

    fn get_page(&self, id: PageId) -> RepositoryResult<PageRecord> {
        self.store().get_page(id)
    }

    fn list_pages(&self) -> RepositoryResult<Vec<PageRecord>> {
        self.store().list_pages()
    }

    fn update_page_row(&mut self, id: PageId, metadata: &PageMetadata) -> RepositoryResult<()> {
        self.store().update_page_row(id, metadata)
    }

    fn delete_page_row(&mut self, id: PageId) -> RepositoryResult<()> {
        self.store().delete_page_row(id)
    }

    fn insert_block(
        &mut self,
        page_id: PageId,
        position: usize,
        body: &BlockBody,
    ) -> RepositoryResult<ContentBlock> {
        self.store().insert_block(page_id, position, body)
    }

    fn list_blocks(&self, page_id: PageId) -> RepositoryResult<Vec<ContentBlock>> {
        self.store().list_blocks(page_id)
    }

    fn delete_blocks_for_page(&mut self, page_id: PageId) -> RepositoryResult<usize> {
        self.store().delete_blocks_for_page(page_id)
    }
}

impl PageRepository for SqlitePageRepository {
    fn transaction<T, E, F>(&mut self, work: F) -> Result<T, TransactionError<E>>
    where
        F: FnOnce(&mut dyn PageStore) -> Result<T, E>,
    {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| TransactionError::Begin(db_error(e)))?;

        let outcome = {
            let mut store = SqliteStore::new(&tx);
            work(&mut store)
        };

        match outcome {
            Ok(value) => {
                tx.commit()
                    .map_err(|e| TransactionError::Commit(db_error(e)))?;
                Ok(value)
            }
            Err(cause) => match tx.rollback() {
                Ok(()) => Err(TransactionError::Aborted(cause)),
                Err(e) => Err(TransactionError::RollbackFailed {
                    cause,
                    rollback: db_error(e),
                }),
            },
        }
    }
}
