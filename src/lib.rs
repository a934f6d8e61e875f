//! smart-assist - AI assistant backend with multi-provider fallback
//!
//! Symptom checks, health chat and resume reviews are answered by hosted
//! inference providers (Gemini, Groq, Hugging Face), tried in priority order
//! until one of them produces text.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::{AppError, ConfigError, ProviderError, ProviderFailure, RouterError};
pub use application::services::{AiProviderRouter, AssistantService, Route};
pub use domain::entities::{AiRequest, AiResponse, ProviderConfig, ProviderKind, TaskType};
pub use infrastructure::config::AppConfig;
pub use infrastructure::llm::{build_router, AiProvider};
