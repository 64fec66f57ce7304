//! Preference storage
//!
//! Typed access with defaults on top of a [`KeyValueStore`]. Storage failures
//! never reach the caller: reads fall back to the default and writes become
//! logged no-ops.

use crate::storage::KeyValueStore;
use crate::types::config::{MemoryScope, SessionPreferences, DEFAULT_MODEL};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Prefix applied to every key
pub const STORAGE_NAMESPACE: &str = "fura-ui";

pub const KEY_API_KEY: &str = "apikey";
pub const KEY_AUTO_MODEL: &str = "autoModel";
pub const KEY_MODEL: &str = "model";
pub const KEY_MEMORY: &str = "memory";
pub const KEY_WEBSEARCH: &str = "websearch";
pub const KEY_HISTORY: &str = "history";

pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn namespaced(key: &str) -> String {
        format!("{}:{}", STORAGE_NAMESPACE, key)
    }

    /// Read `key`, returning `default` when absent or unparsable
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get_raw(&Self::namespaced(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!("Failed to read preference '{}': {}", key, e);
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring malformed preference '{}': {}", key, e);
                default
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize preference '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set_raw(&Self::namespaced(key), json) {
            tracing::warn!("Failed to save preference '{}': {}", key, e);
        } else {
            tracing::debug!("Saved preference '{}'", key);
        }
    }

    pub fn delete(&mut self, key: &str) {
        if let Err(e) = self.store.delete(&Self::namespaced(key)) {
            tracing::warn!("Failed to delete preference '{}': {}", key, e);
        }
    }

    pub fn api_key(&self) -> Option<String> {
        let key: String = self.get(KEY_API_KEY, String::new());
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn set_api_key(&mut self, key: &str) {
        self.set(KEY_API_KEY, key);
    }

    pub fn clear_api_key(&mut self) {
        self.delete(KEY_API_KEY);
    }

    pub fn auto_model(&self) -> bool {
        self.get(KEY_AUTO_MODEL, true)
    }

    pub fn set_auto_model(&mut self, auto: bool) {
        self.set(KEY_AUTO_MODEL, &auto);
    }

    pub fn model(&self) -> String {
        self.get(KEY_MODEL, DEFAULT_MODEL.to_string())
    }

    pub fn set_model(&mut self, model: &str) {
        self.set(KEY_MODEL, model);
    }

    pub fn memory_scope(&self) -> MemoryScope {
        self.get(KEY_MEMORY, MemoryScope::Public)
    }

    pub fn set_memory_scope(&mut self, scope: MemoryScope) {
        self.set(KEY_MEMORY, &scope);
    }

    pub fn websearch(&self) -> bool {
        self.get(KEY_WEBSEARCH, false)
    }

    pub fn set_websearch(&mut self, enabled: bool) {
        self.set(KEY_WEBSEARCH, &enabled);
    }

    /// Current values of every request-shaping preference
    pub fn session_preferences(&self) -> SessionPreferences {
        SessionPreferences {
            memory_scope: self.memory_scope(),
            auto_model: self.auto_model(),
            model: self.model(),
            websearch: self.websearch(),
            api_key: self.api_key(),
        }
    }
}
