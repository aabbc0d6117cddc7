pub mod errors;
pub mod page_editing_service;
pub mod site_service;

pub use errors::{EditError, EditResult};
pub use page_editing_service::{EventCallback, PageEditingService, PageFilter};
pub use site_service::SiteService;
