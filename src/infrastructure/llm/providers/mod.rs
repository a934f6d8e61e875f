//! LLM Providers

pub mod gemini;
pub mod groq;
pub mod huggingface;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use huggingface::HuggingFaceProvider;

use std::sync::Arc;

use reqwest::{Response, StatusCode};

use crate::application::errors::{ConfigError, ProviderError, ProviderResult};
use crate::application::services::{AiProviderRouter, Route};
use crate::domain::entities::{ProviderConfig, ProviderKind};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm::AiProvider;

/// Build the HTTP client for a configured provider
pub fn build_provider(config: &ProviderConfig) -> ProviderResult<Arc<dyn AiProvider>> {
    let api_key = config
        .api_key
        .as_ref()
        .ok_or(ProviderError::MissingApiKey)?
        .expose()
        .to_string();
    let model = Some(config.model.as_str());

    let provider: Arc<dyn AiProvider> = match config.kind {
        ProviderKind::Gemini => {
            let mut p = GeminiProvider::new(api_key, model).with_name(&config.name);
            if let Some(endpoint) = &config.endpoint {
                p = p.with_endpoint(endpoint);
            }
            Arc::new(p)
        }
        ProviderKind::Groq => {
            let mut p = GroqProvider::new(api_key, model).with_name(&config.name);
            if let Some(endpoint) = &config.endpoint {
                p = p.with_endpoint(endpoint);
            }
            Arc::new(p)
        }
        ProviderKind::HuggingFace => {
            let mut p = HuggingFaceProvider::new(api_key, model).with_name(&config.name);
            if let Some(endpoint) = &config.endpoint {
                p = p.with_endpoint(endpoint);
            }
            Arc::new(p)
        }
    };

    Ok(provider)
}

/// Build HTTP clients for every enabled provider in the config and hand
/// them to a router
pub fn build_router(config: &AppConfig) -> Result<AiProviderRouter, ConfigError> {
    let mut routes = Vec::new();

    for provider_config in config.provider_configs()? {
        if !provider_config.enabled {
            tracing::debug!("Provider {} disabled", provider_config.name);
            continue;
        }
        let provider = build_provider(&provider_config)
            .map_err(|_| ConfigError::MissingField(format!("{} api-key", provider_config.name)))?;
        tracing::info!("{} configured ({})", provider_config.name, provider_config.model);
        routes.push(Route::new(provider_config, provider));
    }

    if routes.is_empty() {
        tracing::error!("No AI providers configured! Set GEMINI_API_KEY, GROQ_API_KEY or HUGGINGFACE_API_KEY");
    }

    Ok(AiProviderRouter::new(routes, config.default_timeout()))
}

/// Map non-2xx responses to provider errors. Bodies only go to debug logs.
pub(crate) async fn check_status(provider: &str, response: Response) -> ProviderResult<Response> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} returned {}: {}", provider, status, body);
        return Err(ProviderError::Status { status: status.as_u16() });
    }

    Ok(response)
}

/// Transport errors, with the URL dropped so query-string keys never leak
pub(crate) fn network_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Network(e.without_url().to_string())
}
