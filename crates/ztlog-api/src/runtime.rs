//! Wiring of the shared client objects.

use crate::events::AuthEvents;
use crate::http::ApiClient;
use crate::navigation::Navigator;
use crate::resources::{AuthApi, ContentsApi, DashboardApi, TagsApi};
use crate::session::SessionContext;
use crate::token_store::TokenStore;
use std::sync::Arc;
use ztlog_storage::CredentialStorage;

/// Everything a front-end needs, built once per process.
#[derive(Debug, Clone)]
pub struct AdminServices {
    pub client: ApiClient,
    pub session: Arc<SessionContext>,
    pub auth: AuthApi,
    pub contents: ContentsApi,
    pub tags: TagsApi,
    pub dashboard: DashboardApi,
}

impl AdminServices {
    /// Load the persisted credential, attach the session to the expiry hub,
    /// and build the resource clients around one shared HTTP client.
    pub fn new(
        base_url: impl Into<String>,
        storage: Arc<dyn CredentialStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let tokens = Arc::new(TokenStore::load(storage));
        let events = Arc::new(AuthEvents::new());
        let session = SessionContext::attach(tokens.clone(), events.clone(), navigator);
        let client = ApiClient::new(base_url, tokens, events);

        Self {
            auth: AuthApi::new(client.clone()),
            contents: ContentsApi::new(client.clone()),
            tags: TagsApi::new(client.clone()),
            dashboard: DashboardApi::new(client.clone()),
            session,
            client,
        }
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        self.session.navigator()
    }
}
