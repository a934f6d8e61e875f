//! Application services - Business logic orchestration

pub mod router;
pub mod prompts;
pub mod assistant;

pub use router::{AiProviderRouter, Route};
pub use prompts::{ChatExchange, SymptomInput, CHAT_CONTEXT_TURNS, MEDICAL_DISCLAIMER};
pub use assistant::{AssistantService, ResumeFeedback, SymptomAnalysis};
