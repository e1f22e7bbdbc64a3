use super::page_query;
use crate::envelope::{Ack, ApiResponse, Page};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Content, ContentDraft};
use serde_json::Value;

/// `/v1/contents` endpoints.
#[derive(Debug, Clone)]
pub struct ContentsApi {
    client: ApiClient,
}

impl ContentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32) -> ApiResult<Page<Content>> {
        let body: Value = self
            .client
            .get_with_query("/v1/contents", &page_query(page))
            .await?;
        Page::from_body(body)
    }

    pub async fn get(&self, ctnt_no: i64) -> ApiResult<Content> {
        let response: ApiResponse<Content> =
            self.client.get(&format!("/v1/contents/{}", ctnt_no)).await?;
        response.into_data()
    }

    pub async fn create(&self, draft: &ContentDraft) -> ApiResult<Ack> {
        self.client.post("/v1/contents", draft).await
    }

    /// `draft.ctnt_no` identifies the post.
    pub async fn update(&self, draft: &ContentDraft) -> ApiResult<Ack> {
        self.client.put("/v1/contents", draft).await
    }

    pub async fn delete(&self, ctnt_no: i64) -> ApiResult<Ack> {
        self.client
            .delete(&format!("/v1/contents/{}", ctnt_no))
            .await
    }
}
