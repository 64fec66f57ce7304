//! Chat endpoint client
//!
//! One JSON POST per exchange against `/v1/chat`, plus a health probe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f64 = 0.7;

/// Substituted when a successful response carries no answer
pub const EMPTY_RESPONSE: &str = "(empty response)";

pub const CHAT_PATH: &str = "/v1/chat";
pub const HEALTH_PATH: &str = "/healthz";
pub const API_KEY_HEADER: &str = "X-API-Key";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Forwarded as-is; whether it does anything is up to the endpoint
    pub memory_scope: String,
    pub websearch: bool,
}

/// Result of the `/healthz` probe
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayHealth {
    pub ok: bool,
    pub detail: Value,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ChatError {
    /// Text shown to the user in the failure bubble
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Anything that can answer a chat request
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest, api_key: Option<&str>) -> Result<String, ChatError>;
}

// ============================================================================
// HTTP client
// ============================================================================

pub struct ChatClient {
    http: reqwest::Client,
    api_base: String,
}

impl ChatClient {
    /// Create a client. Chat requests have no timeout and wait for the endpoint to settle.
    pub fn new(api_base: impl Into<String>) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn health(&self) -> GatewayHealth {
        let url = format!("{}{}", self.api_base, HEALTH_PATH);
        let result = async {
            let response = self
                .http
                .get(&url)
                .timeout(HEALTH_TIMEOUT)
                .send()
                .await?
                .error_for_status()?;
            response.json::<Value>().await
        }
        .await;

        match result {
            Ok(detail) => GatewayHealth { ok: true, detail },
            Err(e) => {
                tracing::debug!("Health probe to {} failed: {}", url, e);
                GatewayHealth {
                    ok: false,
                    detail: Value::Null,
                }
            }
        }
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn chat(&self, request: &ChatRequest, api_key: Option<&str>) -> Result<String, ChatError> {
        let url = format!("{}{}", self.api_base, CHAT_PATH);
        let mut builder = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(request);
        if let Some(key) = api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        tracing::debug!("POST {} (model: {:?})", url, request.model);
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &body),
            });
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| ChatError::Decode(e.to_string()))?;
        Ok(extract_answer(&json))
    }
}

/// Human-readable message from an error body: `detail`, then `error`, then the
/// body itself.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["detail", "error"]
            .iter()
            .find_map(|field| match map.get(*field) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .unwrap_or_else(|| Value::Object(map).to_string()),
        Ok(Value::String(s)) => s,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("HTTP {}", status),
    }
}

/// The `answer` field of a success body, or [`EMPTY_RESPONSE`]
pub fn extract_answer(body: &Value) -> String {
    match body.get("answer") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Null) | Some(Value::String(_)) | None => EMPTY_RESPONSE.to_string(),
        Some(other) => other.to_string(),
    }
}
