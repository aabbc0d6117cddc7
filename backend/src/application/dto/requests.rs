use super::pages::{ActorPayload, BlockPayload, PageDraftPayload, PageDto, PageSummaryDto};
use crate::application::services::{EditError, PageFilter};
use serde::{Deserialize, Serialize};

/// Listing filter as named by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPayload {
    #[default]
    All,
    Mine,
    Published,
}

impl From<FilterPayload> for PageFilter {
    fn from(filter: FilterPayload) -> Self {
        match filter {
            FilterPayload::All => PageFilter::All,
            FilterPayload::Mine => PageFilter::Mine,
            FilterPayload::Published => PageFilter::Published,
        }
    }
}

/// The operation surface exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    ListPages {
        #[serde(default)]
        filter: FilterPayload,
    },
    GetPage {
        page_id: i64,
    },
    GetSiteName,
    SetSiteName {
        name: String,
    },
    CreatePage {
        page: PageDraftPayload,
        blocks: Vec<BlockPayload>,
    },
    UpdatePage {
        page_id: i64,
        page: PageDraftPayload,
        blocks: Vec<BlockPayload>,
    },
    DeletePage {
        page_id: i64,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListPages { .. } => "list_pages",
            Operation::GetPage { .. } => "get_page",
            Operation::GetSiteName => "get_site_name",
            Operation::SetSiteName { .. } => "set_site_name",
            Operation::CreatePage { .. } => "create_page",
            Operation::UpdatePage { .. } => "update_page",
            Operation::DeletePage { .. } => "delete_page",
        }
    }
}

/// One request: who is asking, and what for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub actor: Option<ActorPayload>,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Pages(Vec<PageSummaryDto>),
    Page(PageDto),
    SiteName { name: String },
    Deleted { deleted: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: String,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

impl From<EditError> for ApiError {
    fn from(error: EditError) -> Self {
        ApiError::new(error.code(), error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl ApiResponse {
    pub fn success(data: ResponseData) -> Self {
        ApiResponse {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        ApiResponse {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}
