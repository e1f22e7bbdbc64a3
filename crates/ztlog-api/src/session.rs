//! Process-wide authentication state.
//!
//! "Authenticated" is never stored; it is the presence of a credential in the
//! [`TokenStore`]. The session listens for [`AuthExpired`] events and turns
//! the first one raised against the live credential into a logout plus a
//! single navigation to the login screen. Later events for the same
//! credential (concurrent requests failing together) find the generation
//! already moved on and are dropped.

use crate::error::ApiResult;
use crate::events::{AuthEvents, AuthExpired, ListenerId};
use crate::navigation::{Navigator, Route};
use crate::token_store::TokenStore;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Snapshot for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    LoggedIn,
    LoggedOut,
}

pub struct SessionContext {
    tokens: Arc<TokenStore>,
    events: Arc<AuthEvents>,
    navigator: Arc<dyn Navigator>,
    listener: Mutex<Option<ListenerId>>,
}

impl SessionContext {
    /// Create the session and register it for expiry events.
    pub fn attach(
        tokens: Arc<TokenStore>,
        events: Arc<AuthEvents>,
        navigator: Arc<dyn Navigator>,
    ) -> Arc<Self> {
        let session = Arc::new(Self {
            tokens,
            events: events.clone(),
            navigator,
            listener: Mutex::new(None),
        });

        let weak = Arc::downgrade(&session);
        let id = events.subscribe(move |event| {
            if let Some(session) = weak.upgrade() {
                session.handle_expired(event);
            }
        });
        *session.listener.lock() = Some(id);

        info!(authenticated = session.is_authenticated(), "Session initialized");
        session
    }

    /// Store a fresh credential.
    pub fn login(&self, credential: &str) -> ApiResult<()> {
        self.tokens.write(credential)?;
        info!("Logged in");
        Ok(())
    }

    /// Drop the credential and go to the login screen.
    ///
    /// Navigation happens even if the durable delete fails.
    pub fn logout(&self) -> ApiResult<()> {
        let result = self.tokens.clear();
        info!("Logged out");
        self.navigator.navigate(Route::Login);
        result.map_err(Into::into)
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_present()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated() {
            SessionStatus::LoggedIn
        } else {
            SessionStatus::LoggedOut
        }
    }

    /// Observe authentication changes.
    pub fn watch_authenticated(&self) -> watch::Receiver<bool> {
        self.tokens.subscribe()
    }

    /// Guard for admin screens: sends the user to login when there is no
    /// credential.
    pub fn require_authenticated(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        debug!("Unauthenticated access, redirecting to login");
        self.navigator.navigate(Route::Login);
        false
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    fn handle_expired(&self, event: AuthExpired) {
        if self.tokens.clear_if_generation(event.generation) {
            warn!(generation = event.generation, "Session expired, logging out");
            self.navigator.navigate(Route::Login);
        } else {
            debug!(generation = event.generation, "Ignoring stale auth expiry");
        }
    }
}

impl Drop for SessionContext {
    fn drop(&mut self) {
        if let Some(id) = self.listener.lock().take() {
            self.events.unsubscribe(id);
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::HistoryNavigator;
    use ztlog_storage::{CredentialStorage, MemoryStorage, StorageKeys};

    struct Fixture {
        storage: Arc<MemoryStorage>,
        tokens: Arc<TokenStore>,
        events: Arc<AuthEvents>,
        nav: Arc<HistoryNavigator>,
        session: Arc<SessionContext>,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let tokens = Arc::new(TokenStore::load(storage.clone()));
        let events = Arc::new(AuthEvents::new());
        let nav = Arc::new(HistoryNavigator::new());
        let session = SessionContext::attach(tokens.clone(), events.clone(), nav.clone());
        Fixture {
            storage,
            tokens,
            events,
            nav,
            session,
        }
    }

    fn stored(f: &Fixture) -> Option<String> {
        f.storage.get(StorageKeys::ACCESS_TOKEN).unwrap()
    }

    #[test]
    fn test_login_then_logout() {
        let f = fixture();
        assert!(!f.session.is_authenticated());

        f.session.login("abc").unwrap();
        assert!(f.session.is_authenticated());
        assert_eq!(stored(&f), Some("abc".to_string()));
        assert_eq!(f.session.status(), SessionStatus::LoggedIn);

        f.session.logout().unwrap();
        assert!(!f.session.is_authenticated());
        assert_eq!(stored(&f), None);
        assert_eq!(f.nav.history(), vec![Route::Login]);
    }

    #[test]
    fn test_expiry_logs_out_once() {
        let f = fixture();
        f.session.login("abc").unwrap();
        let generation = f.tokens.generation();

        for _ in 0..5 {
            f.events.emit(AuthExpired { generation });
        }

        assert!(!f.session.is_authenticated());
        assert_eq!(stored(&f), None);
        assert_eq!(f.nav.count(Route::Login), 1);
    }

    #[test]
    fn test_expiry_for_replaced_credential_ignored() {
        let f = fixture();
        f.session.login("old").unwrap();
        let stale = f.tokens.generation();
        f.session.login("new").unwrap();

        f.events.emit(AuthExpired { generation: stale });
        assert!(f.session.is_authenticated());
        assert!(f.nav.history().is_empty());
    }

    #[test]
    fn test_expiry_without_credential_ignored() {
        let f = fixture();
        f.events.emit(AuthExpired {
            generation: f.tokens.generation(),
        });
        assert!(f.nav.history().is_empty());
    }

    #[test]
    fn test_require_authenticated_redirects() {
        let f = fixture();
        assert!(!f.session.require_authenticated());
        assert_eq!(f.nav.last(), Some(Route::Login));

        f.session.login("abc").unwrap();
        assert!(f.session.require_authenticated());
        assert_eq!(f.nav.history().len(), 1);
    }

    #[test]
    fn test_watch_authenticated() {
        let f = fixture();
        let rx = f.session.watch_authenticated();
        f.session.login("abc").unwrap();
        assert!(*rx.borrow());
        f.events.emit(AuthExpired {
            generation: f.tokens.generation(),
        });
        assert!(!*rx.borrow());
    }

    #[test]
    fn test_initialized_from_persisted_credential() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(StorageKeys::ACCESS_TOKEN, "persisted").unwrap();
        let session = SessionContext::attach(
            Arc::new(TokenStore::load(storage)),
            Arc::new(AuthEvents::new()),
            Arc::new(HistoryNavigator::new()),
        );
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let f = fixture();
        assert_eq!(f.events.listener_count(), 1);
        let events = f.events.clone();
        drop(f);
        assert_eq!(events.listener_count(), 0);
    }
}
