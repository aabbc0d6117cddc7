/// Domain aggregates
use super::base::{Entity, ValidationError};
use super::entities::{normalize_positions, BlockDraft, ContentBlock, Positioned};
use super::value_objects::{AuthorName, BlockBody, PageId, PageStatus, PageTitle};
use chrono::NaiveDate;

/// Page metadata as submitted by an author, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDraft {
    pub title: String,
    /// Requested author; `None` lets the service pick one
    pub author: Option<String>,
    pub creation_date: NaiveDate,
    /// `None` keeps the page as an unpublished draft
    pub publication_date: Option<NaiveDate>,
}

impl PageDraft {
    pub fn new(title: impl Into<String>, creation_date: NaiveDate) -> Self {
        PageDraft {
            title: title.into(),
            author: None,
            creation_date,
            publication_date: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_publication_date(mut self, publication_date: NaiveDate) -> Self {
        self.publication_date = Some(publication_date);
        self
    }

    /// Check the title, then the date order, ignoring blocks
    pub fn validate_metadata(&self) -> Result<PageTitle, ValidationError> {
        let title = PageTitle::new(self.title.as_str())
            .map_err(|e| ValidationError::InvalidTitle(e.to_string()))?;

        if let Some(publication_date) = self.publication_date {
            if publication_date < self.creation_date {
                return Err(ValidationError::InvalidDateOrder(format!(
                    "publication date {} is before creation date {}",
                    publication_date, self.creation_date
                )));
            }
        }

        Ok(title)
    }

    /// Check the draft and its blocks against the page invariants.
    ///
    /// Checks run in a fixed order and the first failure wins: title,
    /// then date order, then block composition.
    pub fn validate(&self, blocks: &[BlockDraft]) -> Result<ValidatedPage, ValidationError> {
        let title = self.validate_metadata()?;

        let headers = blocks.iter().filter(|b| !b.kind().is_body()).count();
        let bodies = blocks.len() - headers;
        if headers == 0 || bodies == 0 {
            return Err(ValidationError::InvalidBlockComposition(format!(
                "a page needs at least one header and one paragraph or image, got {} header(s) and {} other block(s)",
                headers, bodies
            )));
        }

        Ok(ValidatedPage {
            title,
            creation_date: self.creation_date,
            publication_date: self.publication_date,
            blocks: blocks.iter().map(|b| b.body().clone()).collect(),
        })
    }
}

/// A draft that passed validation; blocks are kept in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPage {
    title: PageTitle,
    creation_date: NaiveDate,
    publication_date: Option<NaiveDate>,
    blocks: Vec<BlockBody>,
}

impl ValidatedPage {
    pub fn title(&self) -> &PageTitle {
        &self.title
    }

    pub fn blocks(&self) -> &[BlockBody] {
        &self.blocks
    }

    /// Attach the resolved author, splitting into row metadata and blocks
    pub fn into_parts(self, author: AuthorName) -> (PageMetadata, Vec<BlockBody>) {
        let metadata = PageMetadata {
            title: self.title,
            author,
            creation_date: self.creation_date,
            publication_date: self.publication_date,
        };
        (metadata, self.blocks)
    }
}

/// The persisted fields of a page row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: PageTitle,
    pub author: AuthorName,
    pub creation_date: NaiveDate,
    pub publication_date: Option<NaiveDate>,
}

impl PageMetadata {
    pub fn status(&self, today: NaiveDate) -> PageStatus {
        PageStatus::of(self.publication_date, today)
    }

    pub fn is_published(&self, today: NaiveDate) -> bool {
        self.status(today) == PageStatus::Published
    }
}

/// A page row without its blocks, as listed by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    id: PageId,
    metadata: PageMetadata,
}

impl PageRecord {
    pub fn new(id: PageId, metadata: PageMetadata) -> Self {
        PageRecord { id, metadata }
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn author(&self) -> &AuthorName {
        &self.metadata.author
    }
}

impl Entity for PageRecord {
    type Id = PageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A Page is the aggregate root: page metadata plus its ordered blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: PageId,
    metadata: PageMetadata,
    blocks: Vec<ContentBlock>,
}

impl Page {
    /// Assemble a page from its row and block rows, ordered by position
    pub fn hydrate(record: PageRecord, blocks: Vec<ContentBlock>) -> Self {
        let mut blocks = blocks;
        blocks.sort_by_key(|b| b.position());
        Page {
            id: record.id,
            metadata: record.metadata,
            blocks,
        }
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn title(&self) -> &PageTitle {
        &self.metadata.title
    }

    pub fn author(&self) -> &AuthorName {
        &self.metadata.author
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.metadata.creation_date
    }

    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.metadata.publication_date
    }

    pub fn status(&self, today: NaiveDate) -> PageStatus {
        self.metadata.status(today)
    }

    /// Blocks ordered by position
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Editable copies of the blocks, renumbered 0..n-1
    pub fn block_drafts(&self) -> Vec<BlockDraft> {
        normalize_positions(self.blocks.iter().map(ContentBlock::to_draft).collect())
    }

    pub fn to_record(&self) -> PageRecord {
        PageRecord::new(self.id, self.metadata.clone())
    }
}

impl Entity for Page {
    type Id = PageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
