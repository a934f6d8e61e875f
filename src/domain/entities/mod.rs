//! Domain entities - Core business objects with no external dependencies

pub mod request;
pub mod provider;

pub use request::{AiRequest, AiResponse, TaskType, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use provider::{ApiKey, ProviderConfig, ProviderKind};
