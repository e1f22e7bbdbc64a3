//! Shared fixtures for controller tests.

use serde_json::{json, Value};
use std::sync::Arc;
use ztlog_api::testing::MockServer;
use ztlog_api::{AdminServices, HistoryNavigator};
use ztlog_storage::MemoryStorage;

pub struct Harness {
    pub server: MockServer,
    pub nav: Arc<HistoryNavigator>,
    pub services: AdminServices,
}

impl Harness {
    pub async fn new() -> Self {
        let server = MockServer::start().await.unwrap();
        let nav = Arc::new(HistoryNavigator::new());
        let services =
            AdminServices::new(server.url(), Arc::new(MemoryStorage::new()), nav.clone());
        Self {
            server,
            nav,
            services,
        }
    }

    pub async fn logged_in() -> Self {
        let harness = Self::new().await;
        harness.services.session.login("test-token").unwrap();
        harness
    }
}

pub fn posts(range: std::ops::RangeInclusive<i64>) -> Value {
    json!(range
        .map(|n| json!({ "ctntNo": n, "title": format!("Post {}", n), "body": "<p>x</p>" }))
        .collect::<Vec<_>>())
}

pub fn tags(names: &[(i64, &str)]) -> Value {
    json!(names
        .iter()
        .map(|(no, name)| json!({ "tagNo": no, "tagName": name, "contents": [] }))
        .collect::<Vec<_>>())
}
