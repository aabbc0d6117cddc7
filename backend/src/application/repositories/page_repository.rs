use crate::domain::{BlockBody, ContentBlock, PageId, PageMetadata, PageRecord, SiteName};
use thiserror::Error;

/// Failures reported by a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Outcome of a unit of work that did not commit.
#[derive(Error, Debug)]
pub enum TransactionError<E> {
    /// The transaction could not be opened; nothing was written
    #[error("Failed to begin transaction: {0}")]
    Begin(RepositoryError),

    /// The work failed and every write it made was rolled back
    #[error("Transaction rolled back: {0}")]
    Aborted(E),

    /// The work succeeded but the commit failed and the store discarded it
    #[error("Failed to commit transaction: {0}")]
    Commit(RepositoryError),

    /// The work failed and the rollback failed too; partial writes may remain
    #[error("Rollback failed after {cause}: {rollback}")]
    RollbackFailed { cause: E, rollback: RepositoryError },
}

/// Row-level primitives over pages and their content blocks.
///
/// Each call is independent; multi-step edits go through
/// [`PageRepository::transaction`].
pub trait PageStore {
    /// Inserts a page row and returns the id assigned by the store.
    fn insert_page(&mut self, metadata: &PageMetadata) -> RepositoryResult<PageId>;

    /// Returns the page row, or `RepositoryError::NotFound`.
    fn get_page(&self, id: PageId) -> RepositoryResult<PageRecord>;

    /// Returns all page rows: published dates ascending, then drafts.
    fn list_pages(&self) -> RepositoryResult<Vec<PageRecord>>;

    /// Overwrites the metadata of an existing page row.
    fn update_page_row(&mut self, id: PageId, metadata: &PageMetadata) -> RepositoryResult<()>;

    /// Deletes a page row. Blocks must already be gone.
    fn delete_page_row(&mut self, id: PageId) -> RepositoryResult<()>;

    /// Inserts one block at `position` for the page.
    fn insert_block(
        &mut self,
        page_id: PageId,
        position: usize,
        body: &BlockBody,
    ) -> RepositoryResult<ContentBlock>;

    /// Returns the page's blocks ordered by position.
    fn list_blocks(&self, page_id: PageId) -> RepositoryResult<Vec<ContentBlock>>;

    /// Deletes every block of the page and returns how many were removed.
    fn delete_blocks_for_page(&mut self, page_id: PageId) -> RepositoryResult<usize>;
}

/// Repository trait for pages that can group store calls atomically.
///
/// Implementations run `work` against a store bound to an open
/// transaction: commit when it returns `Ok`, roll back when it returns
/// `Err`.
pub trait PageRepository: PageStore {
    fn transaction<T, E, F>(&mut self, work: F) -> Result<T, TransactionError<E>>
    where
        F: FnOnce(&mut dyn PageStore) -> Result<T, E>;
}

/// Storage for the single site-wide settings row.
pub trait SiteSettingsRepository {
    /// Returns the site name, or `RepositoryError::NotFound` when unset.
    fn get_site_name(&self) -> RepositoryResult<SiteName>;

    fn set_site_name(&mut self, name: &SiteName) -> RepositoryResult<()>;
}
