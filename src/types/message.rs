//! Message types
//!
//! Defines chat turns as they are persisted in the history log.

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message from the user
    User,
    /// Message from the remote assistant (answers and failure notices)
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single timestamped chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Creation time in epoch milliseconds
    #[serde(rename = "ts")]
    pub timestamp: i64,
    /// The role of the message sender
    pub role: Role,
    /// The content of the message
    pub content: String,
}

impl ChatTurn {
    /// Create a turn stamped with the given epoch millis
    pub fn new(timestamp: i64, role: Role, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            role,
            content: content.into(),
        }
    }
}
