//! Model types
//!
//! Catalog of models the chat endpoint advertises for manual selection.

use serde::{Deserialize, Serialize};

/// A model that can be picked when automatic selection is off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Identifier sent as the `model` request field
    pub id: String,
    /// Display name
    pub label: String,
    /// Short hint shown next to the label
    pub tip: String,
}

impl ModelInfo {
    fn new(id: &str, label: &str, tip: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tip: tip.to_string(),
        }
    }
}

/// Models known to the gateway, in picker order
pub fn model_catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("llama3:8b", "Llama3 8B", "Meta's Llama3 model"),
        ModelInfo::new("mistral:7b", "Mistral 7B", "Mistral AI's 7B model"),
        ModelInfo::new("mixtral:8x7b", "Mixtral 8x7B", "Mistral's mixture-of-experts model"),
        ModelInfo::new("command-r", "Command R", "Cohere's reasoning model"),
        ModelInfo::new("codellama-7b", "CodeLlama 7B", "Meta's code model"),
        ModelInfo::new("starcoder:7b", "Starcoder 7B", "HuggingFace's coding model"),
        ModelInfo::new("nous-hermes2:latest", "Nous Hermes 2", "Nous Research instruction model"),
        ModelInfo::new("gpt-oss:latest", "GPT-OSS", "Open-weight general model"),
    ]
}

/// Look up a catalog entry by id
pub fn find_model(id: &str) -> Option<ModelInfo> {
    model_catalog().into_iter().find(|m| m.id == id)
}
