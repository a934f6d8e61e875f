//! Provider router - priority-ordered fallback across AI providers

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::application::errors::{ProviderError, ProviderFailure, RouterError};
use crate::domain::entities::{AiRequest, AiResponse, ProviderConfig};
use crate::infrastructure::llm::AiProvider;

/// A configured provider and the client that serves it
#[derive(Clone)]
pub struct Route {
    pub config: ProviderConfig,
    pub provider: Arc<dyn AiProvider>,
}

impl Route {
    pub fn new(config: ProviderConfig, provider: Arc<dyn AiProvider>) -> Self {
        Self { config, provider }
    }
}

/// Walks providers in ascending priority until one produces text
pub struct AiProviderRouter {
    /// Sorted by priority; ties keep configuration order
    routes: Vec<Route>,
    default_timeout: Duration,
}

impl AiProviderRouter {
    pub fn new(mut routes: Vec<Route>, default_timeout: Duration) -> Self {
        routes.sort_by_key(|r| r.config.priority);
        Self {
            routes,
            default_timeout,
        }
    }

    /// Names of enabled providers in the order they are tried
    pub fn order(&self) -> Vec<&str> {
        self.enabled().map(|r| r.config.name.as_str()).collect()
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn enabled(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| r.config.enabled)
    }

    /// Send a request, falling back to the next provider on any failure
    pub async fn dispatch(&self, request: &AiRequest) -> Result<AiResponse, RouterError> {
        let mut failures = Vec::new();

        for route in self.enabled() {
            let name = &route.config.name;
            let timeout = route.config.timeout.unwrap_or(self.default_timeout);

            info!("Attempting {} for {} request", name, request.task_type);

            let started = Instant::now();
            let outcome = match tokio::time::timeout(timeout, route.provider.generate(request)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(timeout)),
            };
            let latency = started.elapsed();

            match outcome.and_then(non_empty) {
                Ok(text) => {
                    info!("Response generated using {} in {:?}", name, latency);
                    return Ok(AiResponse {
                        text,
                        provider_used: name.clone(),
                        latency,
                    });
                }
                Err(e) => {
                    warn!("{} failed: {}", name, e);
                    failures.push(ProviderFailure {
                        provider: name.clone(),
                        error: e,
                    });
                }
            }
        }

        if failures.is_empty() {
            warn!("No enabled AI providers to dispatch to");
        } else {
            error!("All {} AI providers failed", failures.len());
        }

        Err(RouterError::AllProvidersExhausted { failures })
    }
}

fn non_empty(text: String) -> Result<String, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
