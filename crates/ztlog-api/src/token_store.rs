//! Process-wide holder of the bearer credential.
//!
//! The credential lives in memory and is mirrored into durable storage under
//! [`StorageKeys::ACCESS_TOKEN`]. Every write or clear bumps a generation
//! counter; requests remember the generation they were sent under so that an
//! expiry can only ever clear the credential it was raised against.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};
use ztlog_storage::{CredentialStorage, StorageKeys, StorageResult};

/// Credential plus the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub token: Option<String>,
    pub generation: u64,
}

struct TokenState {
    token: Option<String>,
    generation: u64,
}

pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    state: Mutex<TokenState>,
    present_tx: watch::Sender<bool>,
}

impl TokenStore {
    /// Initialize from durable storage. A read failure is logged and treated
    /// as "not logged in".
    pub fn load(storage: Arc<dyn CredentialStorage>) -> Self {
        let token = match storage.get(StorageKeys::ACCESS_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored credential, starting logged out");
                None
            }
        };
        debug!(present = token.is_some(), "Token store loaded");

        let (present_tx, _) = watch::channel(token.is_some());
        Self {
            storage,
            state: Mutex::new(TokenState {
                token,
                generation: 0,
            }),
            present_tx,
        }
    }

    /// Current credential, if any.
    pub fn read(&self) -> Option<String> {
        self.state.lock().token.clone()
    }

    /// Credential and generation, read atomically.
    pub fn snapshot(&self) -> TokenSnapshot {
        let state = self.state.lock();
        TokenSnapshot {
            token: state.token.clone(),
            generation: state.generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    pub fn is_present(&self) -> bool {
        self.state.lock().token.is_some()
    }

    /// Persist a credential, replacing any prior value.
    pub fn write(&self, credential: &str) -> StorageResult<()> {
        let mut state = self.state.lock();
        self.storage.set(StorageKeys::ACCESS_TOKEN, credential)?;
        state.token = Some(credential.to_string());
        state.generation += 1;
        drop(state);

        self.present_tx.send_replace(true);
        Ok(())
    }

    /// Remove the credential from memory and durable storage.
    ///
    /// Memory is cleared even when the storage delete fails.
    pub fn clear(&self) -> StorageResult<()> {
        let mut state = self.state.lock();
        state.token = None;
        state.generation += 1;
        let result = self.storage.delete(StorageKeys::ACCESS_TOKEN).map(|_| ());
        drop(state);

        self.present_tx.send_replace(false);
        result
    }

    /// Clear only if a credential is present and `generation` is still the
    /// live one. Returns whether this call cleared it.
    pub fn clear_if_generation(&self, generation: u64) -> bool {
        let mut state = self.state.lock();
        if state.token.is_none() || state.generation != generation {
            return false;
        }
        state.token = None;
        state.generation += 1;
        if let Err(e) = self.storage.delete(StorageKeys::ACCESS_TOKEN) {
            warn!(error = %e, "Failed to delete stored credential");
        }
        drop(state);

        self.present_tx.send_replace(false);
        true
    }

    /// Observe "credential present" changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.present_tx.subscribe()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TokenStore")
            .field("present", &state.token.is_some())
            .field("generation", &state.generation)
            .finish()
    }
}
