//! Prompt construction for each task type

use chrono::{DateTime, Utc};

use crate::domain::entities::{AiRequest, TaskType};

/// Exchanges from the chat history included as context
pub const CHAT_CONTEXT_TURNS: usize = 3;

pub const MEDICAL_DISCLAIMER: &str = "This is general health information only, NOT medical advice. \
Always consult qualified healthcare professionals for medical concerns.";

const SYMPTOM_SYSTEM: &str = "You are a medical information assistant. Provide general health information only. \
Always include a disclaimer that this is NOT medical advice and users should consult healthcare professionals.";

const CHAT_SYSTEM: &str = "You are a helpful health information chatbot. Provide accurate, friendly responses \
to general health questions. Always be empathetic and include disclaimers when appropriate.";

const RESUME_SYSTEM: &str = "You are a professional resume reviewer and career coach. \
Provide constructive, actionable feedback.";

/// Patient details for a symptom check
#[derive(Debug, Clone)]
pub struct SymptomInput {
    pub symptoms: String,
    pub age: u32,
    pub gender: String,
    pub duration: String,
}

/// One question/answer pair from an ongoing chat
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub user: String,
    pub bot: String,
    pub asked_at: DateTime<Utc>,
}

impl ChatExchange {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
            asked_at: Utc::now(),
        }
    }
}

pub fn symptom_request(input: &SymptomInput) -> AiRequest {
    let prompt = format!(
        "Analyze these symptoms and provide health information:\n\n\
         Symptoms: {}\n\
         Age: {}\n\
         Gender: {}\n\
         Duration: {}\n\n\
         Provide a JSON response with:\n\
         1. possible_conditions: List of 3-5 possible conditions (not diagnoses)\n\
         2. severity: \"Low\", \"Medium\", or \"High\"\n\
         3. precautions: List of 3-5 general precautions\n\
         4. when_to_see_doctor: Specific warning signs\n\n\
         Remember: This is information only, NOT medical advice.",
        input.symptoms, input.age, input.gender, input.duration
    );

    AiRequest::new(TaskType::Symptom, prompt)
        .with_system(SYMPTOM_SYSTEM)
        .with_temperature(0.3)
}

/// Chat prompt, with the most recent exchanges inlined as context
pub fn chat_request(question: &str, history: &[ChatExchange]) -> AiRequest {
    let recent = &history[history.len().saturating_sub(CHAT_CONTEXT_TURNS)..];

    let prompt = if recent.is_empty() {
        question.to_string()
    } else {
        let context = recent
            .iter()
            .map(|ex| format!("User: {}\nBot: {}", ex.user, ex.bot))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Previous conversation:\n{}\n\nUser: {}", context, question)
    };

    AiRequest::new(TaskType::Chat, prompt)
        .with_system(CHAT_SYSTEM)
        .with_temperature(0.7)
}

pub fn resume_request(resume_text: &str, target_role: &str) -> AiRequest {
    let prompt = format!(
        "Analyze this resume for a {role} position:\n\n\
         {resume}\n\n\
         Provide detailed feedback in JSON format with:\n\
         1. overall_score: 0-100\n\
         2. strengths: List of 3-5 strong points\n\
         3. improvements: List of 3-5 specific improvements\n\
         4. ats_compatibility: Score 0-100 (keyword matching, formatting)\n\
         5. missing_keywords: Important keywords for {role} that are missing\n\
         6. formatting_feedback: Comments on structure and readability",
        role = target_role,
        resume = resume_text
    );

    AiRequest::new(TaskType::Resume, prompt)
        .with_system(RESUME_SYSTEM)
        .with_temperature(0.4)
}
