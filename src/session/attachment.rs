//! Single-use text attachments

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;

static TEXT_MIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^text/plain").expect("valid regex"));
static TXT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.txt$").expect("valid regex"));

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("File does not look like plain text: {0}")]
    NotText(String),
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A text document held in memory until the next send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub text: String,
}

impl Attachment {
    /// Accept a picked file when its mime type or name says plain text
    pub fn from_file(
        name: &str,
        mime: Option<&str>,
        text: impl Into<String>,
    ) -> Result<Self, AttachmentError> {
        if !is_text_file(name, mime) {
            return Err(AttachmentError::NotText(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            text: text.into(),
        })
    }

    /// Read a file from disk, checking the signature before touching the contents
    pub async fn read_path(path: &Path) -> Result<Self, AttachmentError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        if !is_text_file(&name, None) {
            return Err(AttachmentError::NotText(name));
        }
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AttachmentError::Read {
                name: name.clone(),
                source,
            })?;
        Ok(Self { name, text })
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn is_text_file(name: &str, mime: Option<&str>) -> bool {
    mime.map(|m| TEXT_MIME.is_match(m)).unwrap_or(false) || TXT_NAME.is_match(name)
}
