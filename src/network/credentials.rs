// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential store contract
//!
//! The interceptor only reads the access token and, after a successful
//! refresh, writes the new tokens back. Where and how they persist is up to
//! the store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::AuthConfig;

/// Token storage capability consumed by the interceptor
pub trait CredentialStore: Send + Sync {
    /// Current access token
    fn token(&self) -> Option<String>;

    /// Replace the access token
    fn set_token(&self, token: &str);

    /// Current refresh token
    fn refresh_token(&self) -> Option<String> {
        None
    }

    /// Replace the refresh token
    fn set_refresh_token(&self, token: &str);
}

/// Optional store handle; a missing store reads empty and ignores writes
#[derive(Clone, Default)]
pub struct Credentials {
    store: Option<Arc<dyn CredentialStore>>,
}

impl Credentials {
    /// Wrap an optional store
    pub fn new(store: Option<Arc<dyn CredentialStore>>) -> Self {
        Self { store }
    }

    /// Current access token, empty strings normalised to `None`
    pub fn token(&self) -> Option<String> {
        self.store
            .as_ref()
            .and_then(|s| s.token())
            .filter(|t| !t.is_empty())
    }

    /// Write the access token
    pub fn set_token(&self, token: &str) {
        if let Some(ref store) = self.store {
            store.set_token(token);
        }
    }

    /// Write the refresh token
    pub fn set_refresh_token(&self, token: &str) {
        if let Some(ref store) = self.store {
            store.set_refresh_token(token);
        }
    }

    /// Whether a store is attached
    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }
}

/// In-memory store keyed like browser local storage
///
/// Tokens live under the configured `access_token_key` and
/// `refresh_token_key`.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    access_key: String,
    refresh_key: String,
    items: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store using the config's key names
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: config.access_token_key.clone(),
            refresh_key: config.refresh_token_key.clone(),
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with an access token
    pub fn with_token(config: &AuthConfig, token: impl Into<String>) -> Self {
        let store = Self::new(config);
        store.items.write().insert(store.access_key.clone(), token.into());
        store
    }

    /// Raw lookup by storage key
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    /// Remove both tokens
    pub fn clear(&self) {
        let mut items = self.items.write();
        items.remove(&self.access_key);
        items.remove(&self.refresh_key);
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.get_item(&self.access_key)
    }

    fn set_token(&self, token: &str) {
        self.items
            .write()
            .insert(self.access_key.clone(), token.to_string());
    }

    fn refresh_token(&self) -> Option<String> {
        self.get_item(&self.refresh_key)
    }

    fn set_refresh_token(&self, token: &str) {
        self.items
            .write()
            .insert(self.refresh_key.clone(), token.to_string());
    }
}
