//! LLM traits - Unified AI interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::errors::ProviderResult;
use crate::domain::entities::AiRequest;

/// Chat message for chat-style completion APIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system" or "user"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// System message (if any) followed by the prompt as a user turn
    pub fn from_request(request: &AiRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_message {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));
        messages
    }
}

/// AI provider - one hosted inference backend
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate text for a request. One attempt, no internal retries.
    async fn generate(&self, request: &AiRequest) -> ProviderResult<String>;
}
