pub mod page_repository;

pub use page_repository::{
    PageRepository, PageStore, RepositoryError, RepositoryResult, SiteSettingsRepository,
    TransactionError,
};
