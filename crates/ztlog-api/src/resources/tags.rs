use super::page_query;
use crate::envelope::{Ack, ApiResponse, Page};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::Tag;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tag_no: Option<i64>,
    tag_name: &'a str,
}

/// `/v1/tags` endpoints.
#[derive(Debug, Clone)]
pub struct TagsApi {
    client: ApiClient,
}

impl TagsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32) -> ApiResult<Page<Tag>> {
        let body: Value = self
            .client
            .get_with_query("/v1/tags", &page_query(page))
            .await?;
        Page::from_body(body)
    }

    pub async fn get(&self, tag_no: i64) -> ApiResult<Tag> {
        let response: ApiResponse<Tag> = self.client.get(&format!("/v1/tags/{}", tag_no)).await?;
        response.into_data()
    }

    pub async fn create(&self, tag_name: &str) -> ApiResult<Ack> {
        self.client
            .post(
                "/v1/tags",
                &TagPayload {
                    tag_no: None,
                    tag_name,
                },
            )
            .await
    }

    pub async fn update(&self, tag_no: i64, tag_name: &str) -> ApiResult<Ack> {
        self.client
            .put(
                "/v1/tags",
                &TagPayload {
                    tag_no: Some(tag_no),
                    tag_name,
                },
            )
            .await
    }

    pub async fn delete(&self, tag_no: i64) -> ApiResult<Ack> {
        self.client.delete(&format!("/v1/tags/{}", tag_no)).await
    }
}
