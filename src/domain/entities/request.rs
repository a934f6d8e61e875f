use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default completion budget when the caller does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Category of AI work being requested
///
/// Only used to build the prompt. Provider selection never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Symptom,
    Chat,
    Resume,
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::Symptom => "symptom",
            TaskType::Chat => "chat",
            TaskType::Resume => "resume",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request for generated text
#[derive(Debug, Clone, PartialEq)]
pub struct AiRequest {
    pub task_type: TaskType,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Instruction sent ahead of the prompt, where the provider supports it
    pub system_message: Option<String>,
}

impl AiRequest {
    pub fn new(task_type: TaskType, prompt: impl Into<String>) -> Self {
        Self {
            task_type,
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            system_message: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    /// System message and prompt joined into one block of text, for
    /// providers that take a single input string
    pub fn combined_prompt(&self) -> String {
        match &self.system_message {
            Some(system) => format!("{}\n\n{}", system, self.prompt),
            None => self.prompt.clone(),
        }
    }
}

/// Text produced by exactly one provider
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub text: String,
    pub provider_used: String,
    pub latency: Duration,
}

impl AiResponse {
    pub fn latency_ms(&self) -> u128 {
        self.latency.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_defaults() {
        let req = AiRequest::new(TaskType::Chat, "hi");
        assert_eq!(req.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(req.temperature, DEFAULT_TEMPERATURE);
        assert!(req.system_message.is_none());
    }

    #[test]
    fn test_combined_prompt() {
        let req = AiRequest::new(TaskType::Resume, "Review this").with_system("Be kind.");
        assert_eq!(req.combined_prompt(), "Be kind.\n\nReview this");

        let bare = AiRequest::new(TaskType::Resume, "Review this");
        assert_eq!(bare.combined_prompt(), "Review this");
    }

    #[test]
    fn test_task_type_serde_names() {
        let json = serde_json::to_string(&TaskType::Symptom).unwrap();
        assert_eq!(json, "\"symptom\"");
        let parsed: TaskType = serde_json::from_str("\"resume\"").unwrap();
        assert_eq!(parsed, TaskType::Resume);
    }
}
