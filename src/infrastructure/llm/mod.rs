//! LLM integration - Multi-provider AI support

pub mod traits;
pub mod providers;

#[cfg(test)]
mod tests;

pub use traits::{AiProvider, ChatMessage};
pub use providers::{build_provider, build_router, GeminiProvider, GroqProvider, HuggingFaceProvider};
