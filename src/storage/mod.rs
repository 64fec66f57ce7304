//! Persistent storage
//!
//! Durable key/value storage for preferences and the chat history log.

pub mod history;
pub mod kv;
pub mod preferences;

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No data directory available for this platform")]
    NoDataDir,
}

/// Raw string storage, the desktop equivalent of browser local storage.
///
/// Values are JSON documents; typing and defaults live in
/// [`preferences::PreferenceStore`].
pub trait KeyValueStore: Send {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_raw(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Platform data directory
///
/// Linux: ~/.local/share/fura-chat, Windows: %APPDATA%/Fura/FuraChat/data,
/// macOS: ~/Library/Application Support/com.Fura.FuraChat
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "Fura", "FuraChat")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
