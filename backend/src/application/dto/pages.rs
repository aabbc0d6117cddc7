use crate::domain::{
    Actor, BlockBody, BlockDraft, BlockKind, ContentBlock, DomainResult, Entity, Page, PageDraft,
    PageRecord, Positioned, Role,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role as sent by the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolePayload {
    #[serde(alias = "Admin")]
    Admin,
    #[serde(alias = "User")]
    User,
}

/// The authenticated actor attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPayload {
    pub id: i64,
    pub name: String,
    pub role: RolePayload,
}

impl From<ActorPayload> for Actor {
    fn from(payload: ActorPayload) -> Self {
        let role = match payload.role {
            RolePayload::Admin => Role::Admin,
            RolePayload::User => Role::User,
        };
        Actor::new(payload.id, payload.name, role)
    }
}

/// Page metadata as submitted by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraftPayload {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Defaults to the current day when omitted
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
}

impl PageDraftPayload {
    pub fn into_draft(self, today: NaiveDate) -> PageDraft {
        PageDraft {
            title: self.title,
            author: self.author,
            creation_date: self.creation_date.unwrap_or(today),
            publication_date: self.publication_date,
        }
    }
}

/// A block as submitted by the client: `{ "type": ..., "content": ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl BlockPayload {
    /// Convert submitted blocks into drafts numbered in submission order
    pub fn into_drafts(payloads: Vec<BlockPayload>) -> DomainResult<Vec<BlockDraft>> {
        let bodies = payloads
            .into_iter()
            .map(|p| BlockBody::new(p.kind.parse::<BlockKind>()?, p.content))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(BlockDraft::sequence(bodies))
    }
}

/// One row of a page listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummaryDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub creation_date: NaiveDate,
    pub publication_date: Option<NaiveDate>,
    pub status: &'static str,
}

impl PageSummaryDto {
    pub fn from_record(record: &PageRecord, today: NaiveDate) -> Self {
        let metadata = record.metadata();
        PageSummaryDto {
            id: record.id().value(),
            title: metadata.title.to_string(),
            author: metadata.author.to_string(),
            creation_date: metadata.creation_date,
            publication_date: metadata.publication_date,
            status: metadata.status(today).as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockDto {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: String,
    pub position: usize,
}

impl From<&ContentBlock> for BlockDto {
    fn from(block: &ContentBlock) -> Self {
        BlockDto {
            id: block.id().value(),
            kind: block.kind().as_str(),
            content: block.content().to_string(),
            position: block.position(),
        }
    }
}

/// A page with its ordered blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDto {
    #[serde(flatten)]
    pub summary: PageSummaryDto,
    pub blocks: Vec<BlockDto>,
}

impl PageDto {
    pub fn from_page(page: &Page, today: NaiveDate) -> Self {
        PageDto {
            summary: PageSummaryDto::from_record(&page.to_record(), today),
            blocks: page.blocks().iter().map(BlockDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorName, BlockId, PageId, PageMetadata, PageTitle};

    #[test]
    fn test_actor_payload_accepts_capitalized_roles() {
        let payload: ActorPayload =
            serde_json::from_str(r#"{"id": 4, "name": "root", "role": "Admin"}"#).unwrap();
        let actor = Actor::from(payload);

        assert!(actor.is_admin());
        assert_eq!(actor.user_id(), 4);
    }

    #[test]
    fn test_page_draft_payload_defaults_creation_date() {
        let payload: PageDraftPayload = serde_json::from_str(r#"{"title": "Hi"}"#).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let draft = payload.into_draft(today);

        assert_eq!(draft.creation_date, today);
        assert!(draft.publication_date.is_none());
        assert!(draft.author.is_none());
    }

    #[test]
    fn test_block_payloads_become_numbered_drafts() {
        let payloads: Vec<BlockPayload> = serde_json::from_str(
            r#"[{"type": "header", "content": "Hello"}, {"type": "image", "content": "image3.jpg"}]"#,
        )
        .unwrap();

        let drafts = BlockPayload::into_drafts(payloads).unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].kind(), BlockKind::Image);
        assert_eq!(drafts[1].position(), 1);
    }

    #[test]
    fn test_block_payload_rejects_unknown_type_and_image() {
        let unknown = vec![BlockPayload {
            kind: "video".to_string(),
            content: "x".to_string(),
        }];
        assert!(BlockPayload::into_drafts(unknown).is_err());

        let bad_image = vec![BlockPayload {
            kind: "image".to_string(),
            content: "selfie.png".to_string(),
        }];
        assert!(BlockPayload::into_drafts(bad_image).is_err());
    }

    #[test]
    fn test_page_dto_serializes_flat_with_typed_blocks() {
        let page_id = PageId::new(5).unwrap();
        let record = PageRecord::new(
            page_id,
            PageMetadata {
                title: PageTitle::new("Flat").unwrap(),
                author: AuthorName::new("alice").unwrap(),
                creation_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                publication_date: None,
            },
        );
        let block = ContentBlock::new(
            BlockId::new(8).unwrap(),
            page_id,
            BlockBody::header("Top").unwrap(),
            0,
        );
        let page = Page::hydrate(record, vec![block]);

        let json = serde_json::to_value(PageDto::from_page(
            &page,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ))
        .unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["publication_date"], serde_json::Value::Null);
        assert_eq!(json["blocks"][0]["type"], "header");
        assert_eq!(json["blocks"][0]["content"], "Top");
    }
}
