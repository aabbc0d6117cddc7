/// Page editing service: validation, authorization and atomic persistence
/// of pages together with their content blocks
use crate::application::repositories::{
    PageRepository, PageStore, RepositoryResult, TransactionError,
};
use crate::application::services::errors::{EditError, EditResult};
use crate::domain::base::{DomainEvent, Entity, ValidationError};
use crate::domain::entities::{self, BlockDraft, Positioned};
use crate::domain::events::{CmsEvent, PageCreated, PageDeleted, PageUpdated};
use crate::domain::value_objects::{Actor, AuthorName, BlockBody, MoveDirection, PageId};
use crate::domain::{Page, PageDraft, PageRecord, ValidatedPage};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Callback type for domain events emitted after a successful edit
pub type EventCallback = Arc<dyn Fn(CmsEvent) + Send + Sync>;

/// Which pages a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFilter {
    /// Every page for authenticated actors, published pages for anonymous ones
    #[default]
    All,
    /// Pages authored by the current actor
    Mine,
    /// Pages whose publication date is today or earlier
    Published,
}

/// Service that keeps a page and its block set consistent across edits
pub struct PageEditingService<R: PageRepository> {
    repository: R,
    event_callback: Option<EventCallback>,
}

impl<R: PageRepository> PageEditingService<R> {
    pub fn new(repository: R) -> Self {
        PageEditingService {
            repository,
            event_callback: None,
        }
    }

    pub fn with_event_callback(mut self, callback: EventCallback) -> Self {
        self.event_callback = Some(callback);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Check a draft against the page invariants without touching the store
    pub fn validate(
        draft: &PageDraft,
        blocks: &[BlockDraft],
    ) -> Result<ValidatedPage, ValidationError> {
        draft.validate(blocks)
    }

    /// Move one block a step up or down, keeping positions contiguous
    pub fn reorder_blocks<T: Positioned>(
        blocks: Vec<T>,
        moved_index: usize,
        direction: MoveDirection,
    ) -> Vec<T> {
        entities::move_block(blocks, moved_index, direction)
    }

    /// Drop the block at `target_position` and shift later blocks up
    pub fn remove_block<T: Positioned>(blocks: Vec<T>, target_position: usize) -> Vec<T> {
        entities::remove_block(blocks, target_position)
    }

    /// List page rows visible to `actor` under `filter`
    pub fn list_pages(
        &self,
        actor: Option<&Actor>,
        filter: PageFilter,
        today: NaiveDate,
    ) -> EditResult<Vec<PageRecord>> {
        let pages = self.repository.list_pages()?;

        let visible: Vec<PageRecord> = match (filter, actor) {
            (PageFilter::All, Some(_)) => pages,
            (PageFilter::All, None) | (PageFilter::Published, _) => pages
                .into_iter()
                .filter(|p| p.metadata().is_published(today))
                .collect(),
            (PageFilter::Mine, Some(actor)) => pages
                .into_iter()
                .filter(|p| p.author().as_str() == actor.name())
                .collect(),
            (PageFilter::Mine, None) => {
                return Err(EditError::Unauthorized(
                    "log in to list your own pages".to_string(),
                ))
            }
        };

        debug!("Listed {} pages with filter {:?}", visible.len(), filter);
        Ok(visible)
    }

    /// Load one page with its ordered blocks.
    ///
    /// Anonymous callers only see published pages; anything else reads as
    /// missing.
    pub fn get_page(
        &self,
        actor: Option<&Actor>,
        page_id: PageId,
        today: NaiveDate,
    ) -> EditResult<Page> {
        let record = self.repository.get_page(page_id)?;
        if actor.is_none() && !record.metadata().is_published(today) {
            return Err(EditError::NotFound(format!("page {}", page_id)));
        }

        let blocks = self.repository.list_blocks(page_id)?;
        Ok(Page::hydrate(record, blocks))
    }

    /// Create a page and its blocks in one transaction
    pub fn create_page(
        &mut self,
        actor: Option<&Actor>,
        draft: PageDraft,
        blocks: Vec<BlockDraft>,
    ) -> EditResult<Page> {
        let actor = require_actor(actor, "create a page")?;
        let author = resolve_author(actor, draft.author.as_deref(), None)?;
        let validated = Self::validate(&draft, &blocks)?;
        let (metadata, bodies) = validated.into_parts(author);

        let page = self
            .repository
            .transaction(|store| -> EditResult<Page> {
                let page_id = store.insert_page(&metadata)?;
                insert_blocks(store, page_id, &bodies)?;
                load_page(store, page_id)
            })
            .map_err(|e| settle("create page", e))?;

        info!(
            "Page {} created by {} with {} blocks",
            page.id(),
            actor.name(),
            page.blocks().len()
        );
        self.emit(CmsEvent::PageCreated(PageCreated {
            page_id: *page.id(),
            title: page.title().to_string(),
            block_count: page.blocks().len(),
        }));

        Ok(page)
    }

    /// Replace a page's metadata and its whole block set in one transaction.
    ///
    /// The old blocks are deleted, the row updated and the new blocks
    /// inserted; a failure at any step restores the previous state.
    pub fn update_page(
        &mut self,
        actor: Option<&Actor>,
        page_id: PageId,
        draft: PageDraft,
        blocks: Vec<BlockDraft>,
    ) -> EditResult<Page> {
        let actor = require_actor(actor, "edit a page")?;
        let existing = self.repository.get_page(page_id)?;
        authorize(actor, &existing, "edit")?;

        let author = resolve_author(actor, draft.author.as_deref(), Some(existing.author()))?;
        let validated = Self::validate(&draft, &blocks)?;
        let (metadata, bodies) = validated.into_parts(author);

        let page = self
            .repository
            .transaction(|store| -> EditResult<Page> {
                let removed = store.delete_blocks_for_page(page_id)?;
                debug!("Removed {} blocks from page {}", removed, page_id);
                store.update_page_row(page_id, &metadata)?;
                insert_blocks(store, page_id, &bodies)?;
                load_page(store, page_id)
            })
            .map_err(|e| settle("update page", e))?;

        info!(
            "Page {} updated by {} with {} blocks",
            page_id,
            actor.name(),
            page.blocks().len()
        );
        self.emit(CmsEvent::PageUpdated(PageUpdated {
            page_id,
            title: page.title().to_string(),
            block_count: page.blocks().len(),
        }));

        Ok(page)
    }

    /// Delete a page together with all of its blocks
    pub fn delete_page(&mut self, actor: Option<&Actor>, page_id: PageId) -> EditResult<()> {
        let actor = require_actor(actor, "delete a page")?;
        let existing = self.repository.get_page(page_id)?;
        authorize(actor, &existing, "delete")?;

        self.repository
            .transaction(|store| -> EditResult<()> {
                store.delete_blocks_for_page(page_id)?;
                store.delete_page_row(page_id)?;
                Ok(())
            })
            .map_err(|e| settle("delete page", e))?;

        info!("Page {} deleted by {}", page_id, actor.name());
        self.emit(CmsEvent::PageDeleted(PageDeleted { page_id }));

        Ok(())
    }

    fn emit(&self, event: CmsEvent) {
        debug!("Emitting {} for {}", event.event_type(), event.aggregate_id());
        if let Some(ref callback) = self.event_callback {
            callback(event);
        }
    }
}

fn require_actor<'a>(actor: Option<&'a Actor>, action: &str) -> EditResult<&'a Actor> {
    actor.ok_or_else(|| EditError::Unauthorized(format!("log in to {}", action)))
}

fn authorize(actor: &Actor, page: &PageRecord, action: &str) -> EditResult<()> {
    if actor.can_edit(page.author()) {
        return Ok(());
    }
    warn!(
        "{} may not {} page {} authored by {}",
        actor.name(),
        action,
        page.id(),
        page.author()
    );
    Err(EditError::Unauthorized(format!(
        "only the author or an admin can {} page {}",
        action,
        page.id()
    )))
}

/// Pick the author for a page.
///
/// Non-admins are pinned to their own name. An omitted author keeps
/// `current` when editing and falls back to the actor when creating.
fn resolve_author(
    actor: &Actor,
    requested: Option<&str>,
    current: Option<&AuthorName>,
) -> EditResult<AuthorName> {
    let requested = requested.map(str::trim).filter(|name| !name.is_empty());

    match (requested, current) {
        (None, Some(current)) => Ok(current.clone()),
        (None, None) => {
            AuthorName::new(actor.name()).map_err(|e| EditError::Unauthorized(e.to_string()))
        }
        (Some(name), _) if actor.is_admin() || name == actor.name() => {
            AuthorName::new(name).map_err(|e| EditError::Unauthorized(e.to_string()))
        }
        (Some(name), _) => {
            warn!("{} tried to publish as {}", actor.name(), name);
            Err(EditError::Unauthorized(format!(
                "{} cannot author pages as {}",
                actor.name(),
                name
            )))
        }
    }
}

fn insert_blocks(
    store: &mut dyn PageStore,
    page_id: PageId,
    bodies: &[BlockBody],
) -> RepositoryResult<()> {
    for (position, body) in bodies.iter().enumerate() {
        store.insert_block(page_id, position, body)?;
    }
    Ok(())
}

fn load_page(store: &dyn PageStore, page_id: PageId) -> EditResult<Page> {
    let record = store.get_page(page_id)?;
    let blocks = store.list_blocks(page_id)?;
    Ok(Page::hydrate(record, blocks))
}

fn settle(operation: &str, error: TransactionError<EditError>) -> EditError {
    let error = EditError::from_transaction(operation, error);
    match &error {
        EditError::RolledBack(reason) => warn!("{} rolled back: {}", operation, reason),
        EditError::InconsistentState { reason, .. } => {
            error!("{} left the store inconsistent: {}", operation, reason)
        }
        _ => {}
    }
    error
}
