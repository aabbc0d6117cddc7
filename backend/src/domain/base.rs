/// Base DDD abstractions for the domain layer
use std::fmt::Debug;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Eq + Debug {}

/// Trait for entities - objects with identity that can change over time
/// Entities are equal if their IDs are equal, regardless of other attributes
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> &Self::Id;
}

/// Trait for domain events - things that have happened in the domain
pub trait DomainEvent: Debug + Clone {
    /// The name/type of the event
    fn event_type(&self) -> &'static str;

    /// Identifier of the aggregate the event belongs to
    fn aggregate_id(&self) -> String;
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value provided
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Reasons a proposed page and block set is rejected before persistence.
///
/// Every variant carries the human-readable reason shown to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title empty after trimming or longer than the allowed maximum
    InvalidTitle(String),
    /// Publication date precedes the creation date
    InvalidDateOrder(String),
    /// Missing a header block or a body (paragraph/image) block
    InvalidBlockComposition(String),
    /// Site name empty after trimming or too long
    InvalidSiteName(String),
}

impl ValidationError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidTitle(_) => "invalid_title",
            ValidationError::InvalidDateOrder(_) => "invalid_date_order",
            ValidationError::InvalidBlockComposition(_) => "invalid_block_composition",
            ValidationError::InvalidSiteName(_) => "invalid_site_name",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidTitle(msg) => write!(f, "Invalid title: {}", msg),
            ValidationError::InvalidDateOrder(msg) => write!(f, "Invalid date order: {}", msg),
            ValidationError::InvalidBlockComposition(msg) => {
                write!(f, "Invalid block composition: {}", msg)
            }
            ValidationError::InvalidSiteName(msg) => write!(f, "Invalid site name: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}
