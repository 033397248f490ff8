//! Durable key-value mirror of the session triple.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build persists to `localStorage`; tests and non-browser builds
//! use `MemoryStorage`. Only the session container and the HTTP client hold a
//! `SessionStorage`; views never touch storage directly.
//!
//! ERROR HANDLING
//! ==============
//! Storage is best-effort. Unavailable storage reads as empty, failed writes
//! are dropped, and a malformed persisted user reads as "no user".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::net::types::UserProfile;

pub const ACCESS_TOKEN_KEY: &str = "sejiwa_access_token";
pub const REFRESH_TOKEN_KEY: &str = "sejiwa_refresh_token";
pub const USER_KEY: &str = "sejiwa_user";

/// String-valued key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. A no-op outside the `csr` build.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("localStorage write failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(key).is_err() {
                    log::warn!("localStorage remove failed for {key}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// In-process store for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Typed accessors for the three persisted session slots.
///
/// Passing `None` removes the key; no empty-string sentinel is ever stored.
#[derive(Clone)]
pub struct SessionStorage {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read_string(ACCESS_TOKEN_KEY)
    }

    pub fn set_access_token(&self, token: Option<&str>) {
        self.write_string(ACCESS_TOKEN_KEY, token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_string(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh_token(&self, token: Option<&str>) {
        self.write_string(REFRESH_TOKEN_KEY, token);
    }

    /// Decode the persisted profile. Malformed JSON reads as `None`.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("dropping malformed persisted user: {e}");
                None
            }
        }
    }

    pub fn set_user(&self, user: Option<&UserProfile>) {
        let Some(user) = user else {
            self.store.remove(USER_KEY);
            return;
        };
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_KEY, &raw),
            Err(e) => log::warn!("failed to encode user for storage: {e}"),
        }
    }

    /// Remove all three slots.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    fn read_string(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|v| !v.is_empty())
    }

    fn write_string(&self, key: &str, value: Option<&str>) {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.store.set(key, v),
            None => self.store.remove(key),
        }
    }
}

impl std::fmt::Debug for SessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStorage").finish_non_exhaustive()
    }
}
