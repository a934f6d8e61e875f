//! Console adapter - interactive chat session for local development

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::application::errors::AppError;
use crate::application::services::{AssistantService, ChatExchange, CHAT_CONTEXT_TURNS};

/// Commands that end the session
const EXIT_WORDS: [&str; 3] = ["exit", "quit", "/quit"];

/// Chat session reading questions line by line
pub struct ConsoleAdapter {
    session_id: String,
    /// Only the exchanges the next prompt can use
    history: Vec<ChatExchange>,
    exchanges: usize,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            history: Vec::new(),
            exchanges: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn history(&self) -> &[ChatExchange] {
        &self.history
    }

    /// Run against the process stdin/stdout
    pub async fn run(&mut self, service: &AssistantService) -> Result<(), AppError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(service, stdin, &mut stdout).await
    }

    /// Answer each input line until EOF or an exit word.
    /// Provider exhaustion is reported and the session continues.
    pub async fn run_with<R, W>(&mut self, service: &AssistantService, input: R, output: &mut W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Starting chat session {}", self.session_id);
        output
            .write_all(b"Ask a health question (type 'exit' to quit).\n")
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&question) {
                break;
            }

            match service.chatbot_reply(question, &self.history).await {
                Ok(response) => {
                    output
                        .write_all(format!("[BOT] {}\n", response.text).as_bytes())
                        .await?;
                    tracing::debug!("[{}] answered by {}", self.session_id, response.provider_used);
                    self.history.push(ChatExchange::new(question, response.text));
                    if self.history.len() > CHAT_CONTEXT_TURNS {
                        let excess = self.history.len() - CHAT_CONTEXT_TURNS;
                        self.history.drain(..excess);
                    }
                    self.exchanges += 1;
                }
                Err(e) => {
                    output.write_all(format!("[BOT] {}\n", e).as_bytes()).await?;
                }
            }
        }

        tracing::info!("Chat session {} ended after {} exchanges", self.session_id, self.exchanges);
        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::ProviderResult;
    use crate::application::services::{AiProviderRouter, Route};
    use crate::domain::entities::{AiRequest, ProviderConfig, ProviderKind};
    use crate::infrastructure::llm::AiProvider;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    /// Answers with the prompt length so history growth is visible
    struct EchoProvider;

    #[async_trait]
    impl AiProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: &AiRequest) -> ProviderResult<String> {
            Ok(format!("prompt had {} chars", request.prompt.len()))
        }
    }

    fn service(with_provider: bool) -> AssistantService {
        let routes = if with_provider {
            vec![Route::new(ProviderConfig::new(ProviderKind::Groq), Arc::new(EchoProvider))]
        } else {
            Vec::new()
        };
        AssistantService::new(Arc::new(AiProviderRouter::new(routes, Duration::from_secs(1))))
    }

    #[tokio::test]
    async fn test_session_keeps_history_until_exit() {
        let service = service(true);
        let mut console = ConsoleAdapter::new();
        let input = "What is flu?\n\nHow long does it last?\nexit\nnever read\n".as_bytes();
        let mut output = Vec::new();

        console.run_with(&service, input, &mut output).await.unwrap();

        assert_eq!(console.history().len(), 2);
        assert_eq!(console.history()[0].user, "What is flu?");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("[BOT] prompt had").count(), 2);
    }

    #[tokio::test]
    async fn test_history_is_capped_to_recent_exchanges() {
        let service = service(true);
        let mut console = ConsoleAdapter::new();
        let input = "q1\nq2\nq3\nq4\nq5\n".as_bytes();
        let mut output = Vec::new();

        console.run_with(&service, input, &mut output).await.unwrap();

        assert_eq!(console.history().len(), CHAT_CONTEXT_TURNS);
        let kept: Vec<&str> = console.history().iter().map(|e| e.user.as_str()).collect();
        assert_eq!(kept, vec!["q3", "q4", "q5"]);
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("[BOT] prompt had").count(), 5);
    }

    #[test]
    fn test_each_session_gets_its_own_id() {
        let first = ConsoleAdapter::new();
        let second = ConsoleAdapter::default();
        assert!(uuid::Uuid::parse_str(first.session_id()).is_ok());
        assert_ne!(first.session_id(), second.session_id());
    }

    #[tokio::test]
    async fn test_unavailable_service_is_reported() {
        let service = service(false);
        let mut console = ConsoleAdapter::new();
        let mut output = Vec::new();

        console.run_with(&service, "hello\n".as_bytes(), &mut output).await.unwrap();

        assert!(console.history().is_empty());
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("[BOT] AI service temporarily unavailable"));
    }
}
