/// Request dispatcher over the page and site services.
///
/// Each request carries its own actor; the dispatcher keeps no session or
/// view state between calls.
use crate::application::dto::{
    ApiError, ApiRequest, ApiResponse, BlockPayload, Operation, PageDto, PageSummaryDto,
    ResponseData,
};
use crate::application::repositories::{PageRepository, SiteSettingsRepository};
use crate::application::services::{EditError, PageEditingService, SiteService};
use crate::domain::{Actor, BlockDraft, PageDraft, PageId};
use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

pub struct CmsApi<R: PageRepository, S: SiteSettingsRepository> {
    pages: PageEditingService<R>,
    site: SiteService<S>,
}

impl<R: PageRepository, S: SiteSettingsRepository> CmsApi<R, S> {
    pub fn new(pages: PageEditingService<R>, site: SiteService<S>) -> Self {
        CmsApi { pages, site }
    }

    pub fn pages(&self) -> &PageEditingService<R> {
        &self.pages
    }

    /// Handle one request using the local calendar day
    pub fn handle(&mut self, request: ApiRequest) -> ApiResponse {
        self.handle_at(request, chrono::Local::now().date_naive())
    }

    /// Handle one request as if it were `today`
    pub fn handle_at(&mut self, request: ApiRequest, today: NaiveDate) -> ApiResponse {
        debug!("Handling {} request", request.operation.name());
        match self.dispatch(request, today) {
            Ok(data) => ApiResponse::success(data),
            Err(error) => ApiResponse::failure(error),
        }
    }

    /// Parse a JSON request, handle it and serialize the response
    pub fn handle_json(&mut self, line: &str, today: NaiveDate) -> String {
        let response = match serde_json::from_str::<ApiRequest>(line) {
            Ok(request) => self.handle_at(request, today),
            Err(e) => ApiResponse::failure(ApiError::bad_request(format!(
                "Malformed request: {}",
                e
            ))),
        };

        serde_json::to_string(&response).unwrap_or_else(|e| internal_error_body(&e.to_string()))
    }

    fn dispatch(&mut self, request: ApiRequest, today: NaiveDate) -> Result<ResponseData, ApiError> {
        let actor: Option<Actor> = request.actor.map(Actor::from);
        let actor = actor.as_ref();

        match request.operation {
            Operation::ListPages { filter } => {
                let records = self.pages.list_pages(actor, filter.into(), today)?;
                Ok(ResponseData::Pages(
                    records
                        .iter()
                        .map(|r| PageSummaryDto::from_record(r, today))
                        .collect(),
                ))
            }
            Operation::GetPage { page_id } => {
                let page = self.pages.get_page(actor, parse_page_id(page_id)?, today)?;
                Ok(ResponseData::Page(PageDto::from_page(&page, today)))
            }
            Operation::GetSiteName => {
                let name = self.site.get_site_name()?;
                Ok(ResponseData::SiteName {
                    name: name.to_string(),
                })
            }
            Operation::SetSiteName { name } => {
                let name = self.site.set_site_name(actor, &name)?;
                Ok(ResponseData::SiteName {
                    name: name.to_string(),
                })
            }
            Operation::CreatePage { page, blocks } => {
                let draft = page.into_draft(today);
                let blocks = block_drafts(&draft, blocks)?;
                let page = self.pages.create_page(actor, draft, blocks)?;
                Ok(ResponseData::Page(PageDto::from_page(&page, today)))
            }
            Operation::UpdatePage {
                page_id,
                page,
                blocks,
            } => {
                let page_id = parse_page_id(page_id)?;
                let draft = page.into_draft(today);
                let blocks = block_drafts(&draft, blocks)?;
                let page = self.pages.update_page(actor, page_id, draft, blocks)?;
                Ok(ResponseData::Page(PageDto::from_page(&page, today)))
            }
            Operation::DeletePage { page_id } => {
                let id = parse_page_id(page_id)?;
                self.pages.delete_page(actor, id)?;
                Ok(ResponseData::Deleted { deleted: page_id })
            }
        }
    }
}

/// Convert submitted blocks. A bad block is only reported once the title
/// and dates have passed, so metadata errors keep their precedence.
fn block_drafts(
    draft: &PageDraft,
    blocks: Vec<BlockPayload>,
) -> Result<Vec<BlockDraft>, ApiError> {
    BlockPayload::into_drafts(blocks).or_else(|e| {
        draft.validate_metadata().map_err(EditError::from)?;
        Err(ApiError::new("invalid_block_content", e.to_string()))
    })
}

/// Response line used when a response cannot be serialized
fn internal_error_body(message: &str) -> String {
    json!({
        "ok": false,
        "error": { "kind": "internal", "message": message },
    })
    .to_string()
}

fn parse_page_id(raw: i64) -> Result<PageId, ApiError> {
    PageId::new(raw).map_err(|e| ApiError::new("not_found", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::PageDraftPayload;
    use serde_json::Value;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload(kind: &str, content: &str) -> BlockPayload {
        BlockPayload {
            kind: kind.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_internal_error_body_escapes_message() {
        let body = internal_error_body("bad \\ path\n\t\"quoted\"");

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["ok"], false);
        assert_eq!(parsed["error"]["kind"], "internal");
        assert_eq!(parsed["error"]["message"], "bad \\ path\n\t\"quoted\"");
    }

    #[test]
    fn test_title_error_wins_over_bad_block() {
        let draft = PageDraftPayload {
            title: "  ".to_string(),
            author: None,
            creation_date: None,
            publication_date: None,
        }
        .into_draft(date(2024, 6, 1));

        let error = block_drafts(&draft, vec![payload("image", "cat.gif")]).unwrap_err();

        assert_eq!(error.kind, "invalid_title");
    }

    #[test]
    fn test_bad_block_reported_when_metadata_is_valid() {
        let draft = PageDraft::new("Fine", date(2024, 6, 1));

        let error = block_drafts(
            &draft,
            vec![payload("header", "h"), payload("video", "clip.mp4")],
        )
        .unwrap_err();

        assert_eq!(error.kind, "invalid_block_content");
    }
}
