//! Configuration types
//!
//! Client configuration and the session preference snapshot.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default chat endpoint base URL
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8090";

/// Model used when automatic model selection is turned off and nothing was picked
pub const DEFAULT_MODEL: &str = "llama3:8b";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the chat endpoint (without the `/v1/chat` suffix)
    pub api_base: String,
    /// Override for the directory holding local storage
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from `FURA_API_BASE` and `FURA_DATA_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("FURA_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base.trim().to_string();
            }
        }
        if let Ok(dir) = std::env::var("FURA_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir.trim()));
            }
        }
        config.validate();
        config
    }

    /// Normalize values
    pub fn validate(&mut self) {
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        if self.api_base.is_empty() {
            self.api_base = DEFAULT_API_BASE.to_string();
        }
    }
}

/// Which memory the remote endpoint should consult
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    #[default]
    Public,
    Private,
}

impl MemoryScope {
    pub const ALL: [MemoryScope; 2] = [MemoryScope::Public, MemoryScope::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryScope::Public => "public",
            MemoryScope::Private => "private",
        }
    }
}

/// Snapshot of the preferences that shape an outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPreferences {
    pub memory_scope: MemoryScope,
    pub auto_model: bool,
    pub model: String,
    pub websearch: bool,
    pub api_key: Option<String>,
}

impl SessionPreferences {
    /// Model to request explicitly, `None` when the endpoint picks one
    pub fn requested_model(&self) -> Option<&str> {
        if self.auto_model {
            None
        } else {
            Some(self.model.as_str())
        }
    }
}

impl Default for SessionPreferences {
    fn default() -> Self {
        Self {
            memory_scope: MemoryScope::Public,
            auto_model: true,
            model: DEFAULT_MODEL.to_string(),
            websearch: false,
            api_key: None,
        }
    }
}
