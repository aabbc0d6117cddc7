/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters allowed in a page title
pub const MAX_TITLE_CHARS: usize = 160;

/// Maximum number of characters allowed in the site name
pub const MAX_SITE_NAME_CHARS: usize = 100;

/// Images an image block may reference
pub const KNOWN_IMAGES: [&str; 4] = ["image1.jpg", "image2.jpg", "image3.jpg", "image4.jpg"];

/// Unique identifier for a Page, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(i64);

impl PageId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            return Err(DomainError::InvalidValue(format!(
                "PageId must be positive, got {}",
                id
            )));
        }
        Ok(PageId(id))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for PageId {}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a content block, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(i64);

impl BlockId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            return Err(DomainError::InvalidValue(format!(
                "BlockId must be positive, got {}",
                id
            )));
        }
        Ok(BlockId(id))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ValueObject for BlockId {}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page title: non-empty after trimming and at most `MAX_TITLE_CHARS` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageTitle(String);

impl PageTitle {
    pub fn new(title: impl Into<String>) -> DomainResult<Self> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue("Title cannot be empty".to_string()));
        }
        let chars = trimmed.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(DomainError::InvalidValue(format!(
                "Title is {} characters long, the maximum is {}",
                chars, MAX_TITLE_CHARS
            )));
        }
        Ok(PageTitle(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PageTitle {}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a page author
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue(
                "Author name cannot be empty".to_string(),
            ));
        }
        Ok(AuthorName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for AuthorName {}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The site-wide display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteName(String);

impl SiteName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidValue(
                "Site name cannot be empty".to_string(),
            ));
        }
        let chars = trimmed.chars().count();
        if chars > MAX_SITE_NAME_CHARS {
            return Err(DomainError::InvalidValue(format!(
                "Site name is {} characters long, the maximum is {}",
                chars, MAX_SITE_NAME_CHARS
            )));
        }
        Ok(SiteName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for SiteName {}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of content block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Paragraph,
    Image,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Header => "header",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Image => "image",
        }
    }

    /// Paragraphs and images form the body of a page
    pub fn is_body(&self) -> bool {
        !matches!(self, BlockKind::Header)
    }
}

impl ValueObject for BlockKind {}

impl FromStr for BlockKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(BlockKind::Header),
            "paragraph" => Ok(BlockKind::Paragraph),
            "image" => Ok(BlockKind::Image),
            other => Err(DomainError::InvalidValue(format!(
                "Unknown block type: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text of a header or paragraph block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockText(String);

impl BlockText {
    pub fn new(text: impl Into<String>) -> DomainResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "Block text cannot be empty".to_string(),
            ));
        }
        Ok(BlockText(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for BlockText {}

/// Reference to one of the images in `KNOWN_IMAGES`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> DomainResult<Self> {
        let reference = reference.into();
        // Accept both bare file names and paths ending in a known file name.
        let file_name = reference
            .rsplit('/')
            .next()
            .unwrap_or(reference.as_str());
        if !KNOWN_IMAGES.contains(&file_name) {
            return Err(DomainError::InvalidValue(format!(
                "Unknown image: {}",
                reference
            )));
        }
        Ok(ImageRef(file_name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ImageRef {}

/// Typed content of a block; the variant determines the block kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockBody {
    Header(BlockText),
    Paragraph(BlockText),
    Image(ImageRef),
}

impl BlockBody {
    /// Build a body from a kind and raw content, applying the kind's validation
    pub fn new(kind: BlockKind, content: impl Into<String>) -> DomainResult<Self> {
        match kind {
            BlockKind::Header => Ok(BlockBody::Header(BlockText::new(content)?)),
            BlockKind::Paragraph => Ok(BlockBody::Paragraph(BlockText::new(content)?)),
            BlockKind::Image => Ok(BlockBody::Image(ImageRef::new(content)?)),
        }
    }

    pub fn header(text: impl Into<String>) -> DomainResult<Self> {
        Self::new(BlockKind::Header, text)
    }

    pub fn paragraph(text: impl Into<String>) -> DomainResult<Self> {
        Self::new(BlockKind::Paragraph, text)
    }

    pub fn image(reference: impl Into<String>) -> DomainResult<Self> {
        Self::new(BlockKind::Image, reference)
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockBody::Header(_) => BlockKind::Header,
            BlockBody::Paragraph(_) => BlockKind::Paragraph,
            BlockBody::Image(_) => BlockKind::Image,
        }
    }

    /// The stored content: block text or image file name
    pub fn content(&self) -> &str {
        match self {
            BlockBody::Header(text) | BlockBody::Paragraph(text) => text.as_str(),
            BlockBody::Image(image) => image.as_str(),
        }
    }
}

impl ValueObject for BlockBody {}

/// Role of an authenticated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
}

impl ValueObject for Role {}

/// The authenticated identity performing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    user_id: i64,
    name: String,
    role: Role,
}

impl Actor {
    /// The name is trimmed so it compares equal to the stored `AuthorName`
    pub fn new(user_id: i64, name: impl Into<String>, role: Role) -> Self {
        Actor {
            user_id,
            name: name.into().trim().to_string(),
            role,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins act on any page; users only on pages they authored
    pub fn can_edit(&self, author: &AuthorName) -> bool {
        self.is_admin() || self.name == author.as_str()
    }
}

impl ValueObject for Actor {}

/// Publication state of a page relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// No publication date
    Draft,
    /// Publication date in the future
    Scheduled,
    /// Publication date today or earlier
    Published,
}

impl PageStatus {
    pub fn of(publication_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match publication_date {
            None => PageStatus::Draft,
            Some(date) if date > today => PageStatus::Scheduled,
            Some(_) => PageStatus::Published,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Draft => "draft",
            PageStatus::Scheduled => "scheduled",
            PageStatus::Published => "published",
        }
    }
}

impl ValueObject for PageStatus {}

/// Direction to move a block within its page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl ValueObject for MoveDirection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_creation() {
        let id = PageId::new(7).unwrap();
        assert_eq!(id.value(), 7);
        assert_eq!(id.to_string(), "7");

        assert!(PageId::new(0).is_err());
        assert!(PageId::new(-3).is_err());
    }

    #[test]
    fn test_block_id_creation() {
        let id = BlockId::new(42).unwrap();
        assert_eq!(id.value(), 42);

        assert!(BlockId::new(0).is_err());
    }

    #[test]
    fn test_page_title_trims_and_bounds_length() {
        let title = PageTitle::new("  Rust for CMS authors  ").unwrap();
        assert_eq!(title.as_str(), "Rust for CMS authors");

        assert!(PageTitle::new("").is_err());
        assert!(PageTitle::new("   ").is_err());

        let longest = "a".repeat(MAX_TITLE_CHARS);
        assert!(PageTitle::new(longest).is_ok());

        let too_long = "a".repeat(MAX_TITLE_CHARS + 1);
        assert!(PageTitle::new(too_long).is_err());
    }

    #[test]
    fn test_page_title_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_TITLE_CHARS);
        assert!(PageTitle::new(accented).is_ok());
    }

    #[test]
    fn test_site_name() {
        assert_eq!(SiteName::new(" My Site ").unwrap().as_str(), "My Site");
        assert!(SiteName::new("").is_err());
        assert!(SiteName::new("x".repeat(MAX_SITE_NAME_CHARS + 1)).is_err());
    }

    #[test]
    fn test_block_kind_round_trips_through_str() {
        for kind in [BlockKind::Header, BlockKind::Paragraph, BlockKind::Image] {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
        }
        assert!("video".parse::<BlockKind>().is_err());

        assert!(!BlockKind::Header.is_body());
        assert!(BlockKind::Paragraph.is_body());
        assert!(BlockKind::Image.is_body());
    }

    #[test]
    fn test_block_body_type_specific_validation() {
        let header = BlockBody::header("Welcome").unwrap();
        assert_eq!(header.kind(), BlockKind::Header);
        assert_eq!(header.content(), "Welcome");

        assert!(BlockBody::paragraph("   ").is_err());

        let image = BlockBody::image("../../images/image2.jpg").unwrap();
        assert_eq!(image.kind(), BlockKind::Image);
        assert_eq!(image.content(), "image2.jpg");

        assert!(BlockBody::image("cat.png").is_err());
        assert!(BlockBody::image("").is_err());
    }

    #[test]
    fn test_actor_permissions() {
        let author = AuthorName::new("alice").unwrap();

        let admin = Actor::new(1, "root", Role::Admin);
        assert!(admin.is_admin());
        assert!(admin.can_edit(&author));

        let alice = Actor::new(2, "alice", Role::User);
        assert!(alice.can_edit(&author));

        let bob = Actor::new(3, "bob", Role::User);
        assert!(!bob.can_edit(&author));
    }

    #[test]
    fn test_actor_name_is_trimmed() {
        let carol = Actor::new(9, "  carol ", Role::User);

        assert_eq!(carol.name(), "carol");
        assert!(carol.can_edit(&AuthorName::new("carol").unwrap()));
    }

    #[test]
    fn test_page_status() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();

        assert_eq!(PageStatus::of(None, today), PageStatus::Draft);
        assert_eq!(PageStatus::of(Some(yesterday), today), PageStatus::Published);
        assert_eq!(PageStatus::of(Some(today), today), PageStatus::Published);
        assert_eq!(PageStatus::of(Some(tomorrow), today), PageStatus::Scheduled);
    }
}
