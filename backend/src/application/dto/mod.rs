pub mod pages;
pub mod requests;

pub use pages::{
    ActorPayload, BlockDto, BlockPayload, PageDraftPayload, PageDto, PageSummaryDto, RolePayload,
};
pub use requests::{ApiError, ApiRequest, ApiResponse, FilterPayload, Operation, ResponseData};
