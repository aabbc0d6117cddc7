pub mod api;
pub mod dto;
pub mod repositories;
pub mod services;

// Re-export key types to avoid naming conflicts
pub use api::CmsApi;
pub use dto::{ApiError, ApiRequest, ApiResponse, Operation, ResponseData};
pub use repositories::{
    PageRepository, PageStore, RepositoryError, RepositoryResult, SiteSettingsRepository,
    TransactionError,
};
pub use services::{
    EditError, EditResult, EventCallback, PageEditingService, PageFilter, SiteService,
};
