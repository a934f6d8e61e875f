use serde::Serialize;
use std::sync::Arc;

use super::prompts::{self, ChatExchange, SymptomInput, MEDICAL_DISCLAIMER};
use super::router::AiProviderRouter;
use crate::application::errors::RouterError;
use crate::domain::entities::{AiRequest, AiResponse, DEFAULT_MAX_TOKENS};

/// Result of a symptom check
#[derive(Debug, Clone, Serialize)]
pub struct SymptomAnalysis {
    pub ai_response: String,
    pub disclaimer: String,
    pub provider_used: String,
}

/// Result of a resume review
#[derive(Debug, Clone, Serialize)]
pub struct ResumeFeedback {
    pub analysis: String,
    pub target_role: String,
    pub provider_used: String,
}

/// The three assistant features, backed by one router
pub struct AssistantService {
    router: Arc<AiProviderRouter>,
    max_tokens: u32,
}

impl AssistantService {
    pub fn new(router: Arc<AiProviderRouter>) -> Self {
        Self {
            router,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn router(&self) -> &AiProviderRouter {
        &self.router
    }

    async fn send(&self, request: AiRequest) -> Result<AiResponse, RouterError> {
        self.router.dispatch(&request.with_max_tokens(self.max_tokens)).await
    }

    pub async fn analyze_symptoms(&self, input: &SymptomInput) -> Result<SymptomAnalysis, RouterError> {
        let response = self.send(prompts::symptom_request(input)).await?;
        Ok(SymptomAnalysis {
            ai_response: response.text,
            disclaimer: MEDICAL_DISCLAIMER.to_string(),
            provider_used: response.provider_used,
        })
    }

    pub async fn chatbot_reply(&self, question: &str, history: &[ChatExchange]) -> Result<AiResponse, RouterError> {
        self.send(prompts::chat_request(question, history)).await
    }

    pub async fn analyze_resume(&self, resume_text: &str, target_role: &str) -> Result<ResumeFeedback, RouterError> {
        let response = self.send(prompts::resume_request(resume_text, target_role)).await?;
        Ok(ResumeFeedback {
            analysis: response.text,
            target_role: target_role.to_string(),
            provider_used: response.provider_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ProviderResult;
    use crate::application::services::router::Route;
    use crate::domain::entities::{ProviderConfig, ProviderKind, TaskType};
    use crate::infrastructure::llm::AiProvider;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every request it sees and echoes the task type
    struct RecordingProvider {
        seen: Arc<Mutex<Vec<AiRequest>>>,
    }

    #[async_trait]
    impl AiProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn generate(&self, request: &AiRequest) -> ProviderResult<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(format!("handled {}", request.task_type))
        }
    }

    fn service() -> (AssistantService, Arc<Mutex<Vec<AiRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let route = Route::new(
            ProviderConfig::new(ProviderKind::Gemini),
            Arc::new(RecordingProvider { seen: seen.clone() }),
        );
        let router = AiProviderRouter::new(vec![route], Duration::from_secs(1));
        (AssistantService::new(Arc::new(router)).with_max_tokens(321), seen)
    }

    #[tokio::test]
    async fn test_symptom_analysis_carries_disclaimer() {
        let (service, seen) = service();
        let input = SymptomInput {
            symptoms: "sore throat".to_string(),
            age: 20,
            gender: "male".to_string(),
            duration: "2 days".to_string(),
        };

        let analysis = service.analyze_symptoms(&input).await.unwrap();
        assert_eq!(analysis.ai_response, "handled symptom");
        assert_eq!(analysis.provider_used, "Gemini");
        assert!(analysis.disclaimer.contains("NOT medical advice"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].task_type, TaskType::Symptom);
        assert_eq!(seen[0].max_tokens, 321);
    }

    #[tokio::test]
    async fn test_chat_and_resume_use_their_task_types() {
        let (service, seen) = service();

        let reply = service.chatbot_reply("hello", &[]).await.unwrap();
        assert_eq!(reply.text, "handled chat");

        let feedback = service.analyze_resume("Rust, Go", "SRE").await.unwrap();
        assert_eq!(feedback.analysis, "handled resume");
        assert_eq!(feedback.target_role, "SRE");

        let kinds: Vec<TaskType> = seen.lock().unwrap().iter().map(|r| r.task_type).collect();
        assert_eq!(kinds, vec![TaskType::Chat, TaskType::Resume]);
    }

    #[tokio::test]
    async fn test_exhaustion_propagates() {
        let router = AiProviderRouter::new(Vec::new(), Duration::from_secs(1));
        let service = AssistantService::new(Arc::new(router));
        let err = service.chatbot_reply("anyone there?", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "AI service temporarily unavailable");
    }
}
