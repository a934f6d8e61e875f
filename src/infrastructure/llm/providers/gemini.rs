//! Google Gemini Provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, network_error};
use crate::application::errors::{ProviderError, ProviderResult};
use crate::domain::entities::{AiRequest, ProviderKind};
use crate::infrastructure::llm::AiProvider;

/// Gemini API endpoint
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider
pub struct GeminiProvider {
    name: String,
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            name: ProviderKind::Gemini.display_name().to_string(),
            api_key: api_key.into(),
            client: Client::new(),
            model: model.unwrap_or(ProviderKind::Gemini.default_model()).to_string(),
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

    /// URL without the key; the key travels as a query parameter
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateRequest {
    /// The system message rides inside the user turn; older models such as
    /// `gemini-pro` reject `systemInstruction`.
    fn from_request(request: &AiRequest) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(request.combined_prompt()) }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }
}

fn extract_text(response: GenerateResponse) -> ProviderResult<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedPayload("Gemini response had no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| ProviderError::MalformedPayload("Candidate has no content".to_string()))?;

    Ok(content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &AiRequest) -> ProviderResult<String> {
        let body = GenerateRequest::from_request(request);

        let response = self.client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        let response = check_status(&self.name, response).await?;

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedPayload(e.without_url().to_string()))?;

        extract_text(generated)
    }
}
