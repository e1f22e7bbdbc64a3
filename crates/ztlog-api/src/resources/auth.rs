use crate::envelope::{Ack, ApiResponse};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::LoginData;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// `/v1/user` endpoints.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns the raw envelope; callers check [`ApiResponse::is_success`].
    pub async fn login(&self, user_id: &str, password: &str) -> ApiResult<ApiResponse<LoginData>> {
        self.client
            .post("/v1/user/login", &LoginRequest { user_id, password })
            .await
    }

    pub async fn logout(&self) -> ApiResult<Ack> {
        self.client
            .post("/v1/user/logout", &serde_json::json!({}))
            .await
    }

    pub async fn signup(&self, username: &str, password: &str) -> ApiResult<Ack> {
        self.client
            .post("/v1/user/signup", &SignupRequest { username, password })
            .await
    }

    pub async fn withdraw(&self) -> ApiResult<Ack> {
        self.client.delete("/v1/user/withdraw").await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> ApiResult<Ack> {
        self.client
            .put(
                "/v1/user/password",
                &ChangePasswordRequest {
                    current_password,
                    new_password,
                },
            )
            .await
    }
}
