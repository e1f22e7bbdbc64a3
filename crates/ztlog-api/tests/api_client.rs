//! End-to-end tests of the HTTP client, resource clients and session
//! against a scripted backend.

use futures_util::future::join_all;
use serde_json::json;
use std::sync::Arc;
use ztlog_api::testing::{MockResponse, MockServer};
use ztlog_api::{
    AdminServices, ApiError, ContentDraft, HistoryNavigator, Route, JSON_CONTENT_TYPE,
};
use ztlog_storage::{CredentialStorage, MemoryStorage, StorageKeys};

struct Harness {
    server: MockServer,
    storage: Arc<MemoryStorage>,
    nav: Arc<HistoryNavigator>,
    services: AdminServices,
}

async fn harness() -> Harness {
    let server = MockServer::start().await.unwrap();
    let storage = Arc::new(MemoryStorage::new());
    let nav = Arc::new(HistoryNavigator::new());
    let services = AdminServices::new(server.url(), storage.clone(), nav.clone());
    Harness {
        server,
        storage,
        nav,
        services,
    }
}

#[tokio::test]
async fn test_request_headers_with_and_without_credential() {
    let h = harness().await;
    h.server
        .on("GET", "/v1/main", MockResponse::success(json!({ "totalPostCount": 3 })));

    h.services.dashboard.main().await.unwrap();
    let anonymous = h.server.last_request("GET", "/v1/main").unwrap();
    assert_eq!(anonymous.header("content-type"), Some(JSON_CONTENT_TYPE));
    assert_eq!(anonymous.header("authorization"), None);

    h.services.session.login("tok-1").unwrap();
    let stats = h.services.dashboard.main().await.unwrap();
    assert_eq!(stats.total_post_count, 3);

    let authorized = h.server.last_request("GET", "/v1/main").unwrap();
    assert_eq!(authorized.header("authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_error_message_from_body_and_fallback() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/contents/1",
        MockResponse::json(400, json!({ "message": "존재하지 않는 글입니다." })),
    );
    h.server
        .on("GET", "/v1/contents/2", MockResponse::raw(500, "<html>oops</html>"));

    let err = h.services.contents.get(1).await.unwrap_err();
    assert_eq!(err.to_string(), "존재하지 않는 글입니다.");
    assert_eq!(err.status(), Some(400));

    let err = h.services.contents.get(2).await.unwrap_err();
    assert_eq!(err.to_string(), "API 오류 (500)");
}

#[tokio::test]
async fn test_list_sends_page_query_and_derives_page_count() {
    let h = harness().await;
    let rows: Vec<_> = (1..=5)
        .map(|n| json!({ "ctntNo": n, "title": format!("post {}", n) }))
        .collect();
    h.server
        .on("GET", "/v1/contents", MockResponse::page(json!(rows), 42));

    let page = h.services.contents.list(2).await.unwrap();
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.page_count(10), 5);

    let request = h.server.last_request("GET", "/v1/contents").unwrap();
    assert_eq!(request.query.as_deref(), Some("no=2"));
}

#[tokio::test]
async fn test_list_shapes_are_normalized() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/tags",
        MockResponse::json(200, json!({ "list": [{ "tagNo": 1, "tagName": "rust" }] })),
    );
    h.server.on(
        "GET",
        "/v1/contents",
        MockResponse::success(json!({
            "list": [{ "ctntNo": 1, "title": "a" }, { "ctntNo": 2, "title": "b" }],
            "count": 23
        })),
    );

    let tags = h.services.tags.list(1).await.unwrap();
    assert_eq!(tags.content.len(), 1);
    assert_eq!(tags.content[0].tag_name, "rust");
    assert_eq!(tags.total_elements, 1);

    let posts = h.services.contents.list(1).await.unwrap();
    assert_eq!(posts.content.len(), 2);
    assert_eq!(posts.total_elements, 23);
    assert_eq!(posts.page_count(10), 3);
}

#[tokio::test]
async fn test_list_without_rows_fails_with_server_message() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/tags",
        MockResponse::json(200, json!({ "code": "FAIL", "message": "조회 실패" })),
    );

    let err = h.services.tags.list(1).await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed { status: None, .. }));
    assert_eq!(err.to_string(), "조회 실패");
}

#[tokio::test]
async fn test_mutation_payloads() {
    let h = harness().await;
    for (method, path) in [
        ("POST", "/v1/contents"),
        ("PUT", "/v1/contents"),
        ("POST", "/v1/tags"),
        ("PUT", "/v1/tags"),
        ("DELETE", "/v1/tags/4"),
        ("PUT", "/v1/user/password"),
    ] {
        h.server.on(method, path, MockResponse::success(json!(null)));
    }

    let draft = ContentDraft::new("Title", "excerpt", "<p>body</p>").with_tags([1]);
    h.services.contents.create(&draft).await.unwrap();
    h.services
        .contents
        .update(&draft.clone().for_update(9))
        .await
        .unwrap();
    h.services.tags.create("rust").await.unwrap();
    h.services.tags.update(4, "go").await.unwrap();
    h.services.tags.delete(4).await.unwrap();
    h.services
        .auth
        .change_password("old-pass", "new-password")
        .await
        .unwrap();

    let created = h.server.last_request("POST", "/v1/contents").unwrap().json();
    assert_eq!(created["tags"], json!([{ "tagNo": 1 }]));
    assert!(created.get("ctntNo").is_none());
    assert_eq!(
        h.server.last_request("PUT", "/v1/contents").unwrap().json()["ctntNo"],
        9
    );
    assert_eq!(
        h.server.last_request("PUT", "/v1/tags").unwrap().json(),
        json!({ "tagNo": 4, "tagName": "go" })
    );
    assert_eq!(h.server.hits("DELETE", "/v1/tags/4"), 1);
    assert_eq!(
        h.server.last_request("PUT", "/v1/user/password").unwrap().json(),
        json!({ "currentPassword": "old-pass", "newPassword": "new-password" })
    );
}

#[tokio::test]
async fn test_login_envelope_is_returned_raw() {
    let h = harness().await;
    h.server.on(
        "POST",
        "/v1/user/login",
        MockResponse::success(json!({ "accessToken": "tok-9" })),
    );

    let response = h.services.auth.login("admin", "pw").await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.data.unwrap().access_token, "tok-9");
    assert_eq!(
        h.server.last_request("POST", "/v1/user/login").unwrap().json(),
        json!({ "userId": "admin", "password": "pw" })
    );
}

#[tokio::test]
async fn test_concurrent_401_logs_out_once() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/contents",
        MockResponse::json(401, json!({ "message": "expired" })),
    );
    h.services.session.login("stale").unwrap();

    let results = join_all((1..=8).map(|page| h.services.contents.list(page))).await;

    assert!(results.iter().all(|r| matches!(r, Err(ApiError::AuthExpired))));
    assert_eq!(h.server.hits("GET", "/v1/contents"), 8);
    assert!(!h.services.session.is_authenticated());
    assert_eq!(h.storage.get(StorageKeys::ACCESS_TOKEN).unwrap(), None);
    assert_eq!(h.nav.history(), vec![Route::Login]);
}

#[tokio::test]
async fn test_401_with_unreadable_body_still_logs_out() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/main",
        MockResponse::json(401, json!({ "message": "expired" })).truncated(),
    );
    h.services.session.login("stale").unwrap();

    let err = h.services.dashboard.main().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(!h.services.session.is_authenticated());
    assert_eq!(h.nav.history(), vec![Route::Login]);
}

#[tokio::test]
async fn test_401_after_relogin_keeps_new_credential() {
    let h = harness().await;
    h.server.on(
        "GET",
        "/v1/main",
        MockResponse::json(401, json!({})).with_delay(std::time::Duration::from_millis(50)),
    );
    h.services.session.login("old").unwrap();

    let services = h.services.clone();
    let in_flight = tokio::spawn(async move { services.dashboard.main().await });
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    h.services.session.login("fresh").unwrap();

    let err = in_flight.await.unwrap().unwrap_err();
    assert!(err.is_auth_expired());
    assert!(h.services.session.is_authenticated());
    assert_eq!(
        h.storage.get(StorageKeys::ACCESS_TOKEN).unwrap(),
        Some("fresh".to_string())
    );
    assert!(h.nav.history().is_empty());
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let h = harness().await;
    h.server
        .on("DELETE", "/v1/contents/3", MockResponse::raw(200, ""));

    let ack = h.services.contents.delete(3).await.unwrap();
    assert!(ack.code.is_none());
}
