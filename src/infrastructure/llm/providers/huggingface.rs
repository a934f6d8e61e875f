//! Hugging Face Inference API Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{check_status, network_error};
use crate::application::errors::{ProviderError, ProviderResult};
use crate::domain::entities::{AiRequest, ProviderKind};
use crate::infrastructure::llm::AiProvider;

/// Inference API endpoint
const API_BASE: &str = "https://api-inference.huggingface.co";

/// Hugging Face provider
pub struct HuggingFaceProvider {
    name: String,
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl HuggingFaceProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            name: ProviderKind::HuggingFace.display_name().to_string(),
            api_key: api_key.into(),
            client: Client::new(),
            model: model.unwrap_or(ProviderKind::HuggingFace.default_model()).to_string(),
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

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

/// Text-generation models answer with either a list of generations or a
/// single object; both carry `generated_text`.
fn extract_text(body: &Value) -> ProviderResult<String> {
    let generation = match body {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(body),
        _ => None,
    };

    generation
        .and_then(|g| g.get("generated_text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::MalformedPayload("Unexpected response format".to_string()))
}

#[async_trait]
impl AiProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &AiRequest) -> ProviderResult<String> {
        let body = InferenceRequest {
            inputs: request.combined_prompt(),
            parameters: Parameters {
                max_new_tokens: request.max_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
        };

        let response = self.client
            .post(self.model_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let response = check_status(&self.name, response).await?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        extract_text(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response() {
        let body = json!([{"generated_text": "Stay hydrated."}]);
        assert_eq!(extract_text(&body).unwrap(), "Stay hydrated.");
    }

    #[test]
    fn test_object_response() {
        let body = json!({"generated_text": "Sleep well."});
        assert_eq!(extract_text(&body).unwrap(), "Sleep well.");
    }

    #[test]
    fn test_error_object_is_malformed() {
        let body = json!({"error": "Model is currently loading", "estimated_time": 20.0});
        assert!(matches!(extract_text(&body), Err(ProviderError::MalformedPayload(_))));

        assert!(extract_text(&json!([])).is_err());
        assert!(extract_text(&json!("text")).is_err());
    }

    #[test]
    fn test_model_url() {
        let provider = HuggingFaceProvider::new("hf_x", Some("mistralai/Mistral-7B-Instruct-v0.2"));
        assert_eq!(
            provider.model_url(),
            "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2"
        );
    }
}
