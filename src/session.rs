//! Session Token
//!
//! The bearer token is held by a [`Session`] that is handed to the API client
//! at construction. Persistence goes through a [`TokenStore`] so the browser's
//! localStorage can be swapped for memory in tests.

use std::sync::{Arc, RwLock};

use crate::config::TOKEN_STORAGE_KEY;

/// Durable storage for a single token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// `window.localStorage` under [`TOKEN_STORAGE_KEY`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        let storage = Self::storage()?;
        storage.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("[SESSION] localStorage unavailable, token kept in memory only");
            return;
        };
        if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
            log::warn!("[SESSION] Failed to persist token");
        }
    }

    fn remove(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

/// Process-local store, used by tests and when no browser storage exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.to_string()))),
        }
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.read().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(token.to_string());
        }
    }

    fn remove(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}

/// Current bearer token plus its durable backing
///
/// Cloning shares the same token.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Restore whatever token the store already holds.
    pub fn restore(store: impl TokenStore + 'static) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self {
            token: Arc::new(RwLock::new(token)),
            store: Arc::new(store),
        }
    }

    /// Session backed by `window.localStorage`
    pub fn browser() -> Self {
        Self::restore(LocalStorageStore)
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Hold `token` for subsequent calls and persist it.
    pub fn attach(&self, token: &str) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
        self.store.save(token);
    }

    /// Forget the token in memory and in storage.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        self.store.remove();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
