/// Domain events
use super::base::DomainEvent;
use super::value_objects::{PageId, SiteName};

/// Event emitted when a new page is created together with its blocks
#[derive(Debug, Clone)]
pub struct PageCreated {
    pub page_id: PageId,
    pub title: String,
    pub block_count: usize,
}

impl DomainEvent for PageCreated {
    fn event_type(&self) -> &'static str {
        "PageCreated"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }
}

/// Event emitted when a page's metadata and block set were replaced
#[derive(Debug, Clone)]
pub struct PageUpdated {
    pub page_id: PageId,
    pub title: String,
    pub block_count: usize,
}

impl DomainEvent for PageUpdated {
    fn event_type(&self) -> &'static str {
        "PageUpdated"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }
}

/// Event emitted when a page and its blocks are deleted
#[derive(Debug, Clone)]
pub struct PageDeleted {
    pub page_id: PageId,
}

impl DomainEvent for PageDeleted {
    fn event_type(&self) -> &'static str {
        "PageDeleted"
    }

    fn aggregate_id(&self) -> String {
        self.page_id.to_string()
    }
}

/// Event emitted when an admin renames the site
#[derive(Debug, Clone)]
pub struct SiteNameChanged {
    pub name: SiteName,
}

impl DomainEvent for SiteNameChanged {
    fn event_type(&self) -> &'static str {
        "SiteNameChanged"
    }

    fn aggregate_id(&self) -> String {
        "site".to_string()
    }
}

/// Every event the CMS emits, for callbacks that want them all
#[derive(Debug, Clone)]
pub enum CmsEvent {
    PageCreated(PageCreated),
    PageUpdated(PageUpdated),
    PageDeleted(PageDeleted),
    SiteNameChanged(SiteNameChanged),
}

impl DomainEvent for CmsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CmsEvent::PageCreated(e) => e.event_type(),
            CmsEvent::PageUpdated(e) => e.event_type(),
            CmsEvent::PageDeleted(e) => e.event_type(),
            CmsEvent::SiteNameChanged(e) => e.event_type(),
        }
    }

    fn aggregate_id(&self) -> String {
        match self {
            CmsEvent::PageCreated(e) => e.aggregate_id(),
            CmsEvent::PageUpdated(e) => e.aggregate_id(),
            CmsEvent::PageDeleted(e) => e.aggregate_id(),
            CmsEvent::SiteNameChanged(e) => e.aggregate_id(),
        }
    }
}
