//! Auth-expiry event hub.
//!
//! The HTTP client emits [`AuthExpired`] here on every 401; the session
//! context (or anything else) registers a listener. The client never holds a
//! reference to its listeners' owners.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A request was rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthExpired {
    /// Token store generation the failed request was sent under.
    pub generation: u64,
}

/// Handle returned by [`AuthEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(AuthExpired) + Send + Sync>;

#[derive(Default)]
pub struct AuthEvents {
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(AuthExpired) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Returns whether the listener was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Call every listener synchronously, in registration order.
    ///
    /// Listeners run outside the registry lock and may (un)subscribe.
    pub fn emit(&self, event: AuthExpired) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        debug!(
            generation = event.generation,
            listeners = listeners.len(),
            "Emitting auth expired"
        );
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl std::fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_every_listener() {
        let events = AuthEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            events.subscribe(move |event| {
                assert_eq!(event.generation, 7);
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        events.emit(AuthExpired { generation: 7 });
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let events = AuthEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let id = events.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit(AuthExpired { generation: 0 });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let events = Arc::new(AuthEvents::new());
        let slot: Arc<Mutex<Option<ListenerId>>> = Arc::new(Mutex::new(None));

        let hub = events.clone();
        let own_id = slot.clone();
        let id = events.subscribe(move |_| {
            if let Some(id) = *own_id.lock() {
                hub.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        events.emit(AuthExpired { generation: 1 });
        assert_eq!(events.listener_count(), 0);
    }
}
