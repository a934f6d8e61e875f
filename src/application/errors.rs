//! Application layer errors

use std::time::Duration;
use thiserror::Error;

/// Failure of a single provider call. Recovered by moving to the next provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: status {status}")]
    Status { status: u16 },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Empty response")]
    EmptyResponse,
}

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// One provider's reason for not serving a request
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: ProviderError,
}

/// Terminal dispatch errors
#[derive(Error, Debug)]
pub enum RouterError {
    /// Every enabled provider failed. The message is safe to show to end users.
    #[error("AI service temporarily unavailable")]
    AllProvidersExhausted { failures: Vec<ProviderFailure> },
}

impl RouterError {
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            RouterError::AllProvidersExhausted { failures } => failures,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Top-level errors surfaced by the command line
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Router(#[from] RouterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
