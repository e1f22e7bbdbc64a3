use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::DashboardStats;

/// `/v1/main` endpoint.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: ApiClient,
}

impl DashboardApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn main(&self) -> ApiResult<DashboardStats> {
        let response: ApiResponse<DashboardStats> = self.client.get("/v1/main").await?;
        response.into_data()
    }
}
