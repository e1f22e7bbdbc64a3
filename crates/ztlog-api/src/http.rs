//! HTTP client for the admin REST API.
//!
//! Every request carries the JSON content type and, when a credential is
//! present, `Authorization: Bearer <token>`. A 401 is broadcast through
//! [`AuthEvents`] before the call fails; nothing is retried.

use crate::error::{ApiError, ApiResult};
use crate::events::{AuthEvents, AuthExpired};
use crate::token_store::TokenStore;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Error body shape; only `message` is read.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn summarize_response_body(body: &str) -> String {
    let preview: String = body.chars().take(120).collect();
    format!("len={},preview={:?}", body.len(), preview)
}

/// Shared HTTP client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    events: Arc<AuthEvents>,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `https://blog.example.com/admin/api`).
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<TokenStore>,
        events: Arc<AuthEvents>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            events,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn events(&self) -> &Arc<AuthEvents> {
        &self.events
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and decode the success body as `T`.
    ///
    /// An empty success body decodes as `{}`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let snapshot = self.tokens.snapshot();
        let started = Instant::now();

        let mut builder = self
            .http_client
            .request(method.clone(), self.url(path))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = snapshot.token.as_deref() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|e| ApiError::request_failed(None, e.to_string()))?;
            builder = builder.body(bytes);
        }

        debug!(method = %method, path, authorized = snapshot.token.is_some(), "Sending request");

        let response = builder.send().await.map_err(|e| {
            warn!(method = %method, path, error = %e, "Request failed to send");
            ApiError::from(e)
        })?;

        let status = response.status();

        // A 401 body is never read.
        if status == StatusCode::UNAUTHORIZED {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            warn!(method = %method, path, elapsed_ms, "Credential rejected");
            self.events.emit(AuthExpired {
                generation: snapshot.generation,
            });
            return Err(ApiError::AuthExpired);
        }

        let text = response.text().await.map_err(ApiError::from)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty());
            warn!(
                method = %method,
                path,
                status = status.as_u16(),
                elapsed_ms,
                body_summary = %summarize_response_body(&text),
                "Request rejected"
            );
            return Err(match message {
                Some(message) => ApiError::request_failed(Some(status.as_u16()), message),
                None => ApiError::status_fallback(status.as_u16()),
            });
        }

        debug!(method = %method, path, status = status.as_u16(), elapsed_ms, "Request finished");

        let body: &str = if text.trim().is_empty() {
            "{}"
        } else {
            text.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            warn!(
                method = %method,
                path,
                error = %e,
                body_summary = %summarize_response_body(body),
                "Undecodable response body"
            );
            ApiError::request_failed(
                Some(status.as_u16()),
                format!("응답 형식 오류 ({}): {}", status.as_u16(), e),
            )
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, None, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.request(Method::GET, path, None, query).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(to_json(body)?), &[])
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(to_json(body)?), &[])
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, None, &[]).await
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::request_failed(None, e.to_string()))
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ztlog_storage::MemoryStorage;

    fn client(base_url: &str) -> ApiClient {
        let tokens = Arc::new(TokenStore::load(Arc::new(MemoryStorage::new())));
        ApiClient::new(base_url, tokens, Arc::new(AuthEvents::new()))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client("http://localhost:8080/admin/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/admin/api");
        assert_eq!(
            client.url("/v1/tags"),
            "http://localhost:8080/admin/api/v1/tags"
        );
    }

    #[test]
    fn test_summarize_response_body_truncates() {
        let body = "x".repeat(500);
        let summary = summarize_response_body(&body);
        assert!(summary.starts_with("len=500,"));
        assert!(summary.len() < 200);
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client("http://localhost");
        client.tokens().write("secret-token").unwrap();
        assert!(!format!("{:?}", client).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_failed() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client(&format!("http://127.0.0.1:{}", port));
        let err = client
            .get::<serde_json::Value>("/v1/main")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: None, .. }));
    }
}
