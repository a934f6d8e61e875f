//! Groq Provider - Fast AI inference

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, network_error};
use crate::application::errors::{ProviderError, ProviderResult};
use crate::domain::entities::{AiRequest, ProviderKind};
use crate::infrastructure::llm::{AiProvider, ChatMessage};

/// Groq API endpoint
const API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq provider
pub struct GroqProvider {
    name: String,
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            name: ProviderKind::Groq.display_name().to_string(),
            api_key: api_key.into(),
            client: Client::new(),
            model: model.unwrap_or(ProviderKind::Groq.default_model()).to_string(),
            base_url: API_BASE.to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get chat completions URL
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Choice in response
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

/// Response message
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_text(response: ChatResponse) -> ProviderResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedPayload("No choices in response".to_string()))?
        .message
        .content
        .ok_or_else(|| ProviderError::MalformedPayload("Choice has no content".to_string()))
}

#[async_trait]
impl AiProvider for GroqProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &AiRequest) -> ProviderResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: ChatMessage::from_request(request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let response = self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let response = check_status(&self.name, response).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        extract_text(chat_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_choice() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "mixtral-8x7b-32768",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Drink water."}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "Drink water.");
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(extract_text(parsed), Err(ProviderError::MalformedPayload(_))));
    }

    #[test]
    fn test_request_includes_system_message() {
        let request = AiRequest::new(crate::domain::entities::TaskType::Chat, "hello")
            .with_system("be brief")
            .with_max_tokens(64);
        let body = ChatRequest {
            model: "m",
            messages: ChatMessage::from_request(&request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["max_tokens"], 64);
    }

    #[test]
    fn test_endpoint_override_strips_slash() {
        let provider = GroqProvider::new("k", None).with_endpoint("http://localhost:9000/v1/");
        assert_eq!(provider.completions_url(), "http://localhost:9000/v1/chat/completions");
        assert_eq!(provider.model, "mixtral-8x7b-32768");
    }
}
