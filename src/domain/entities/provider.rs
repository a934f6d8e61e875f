use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Hosted inference backend a provider entry talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Groq,
    HuggingFace,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [ProviderKind::Gemini, ProviderKind::Groq, ProviderKind::HuggingFace];

    /// Name credited in responses when the config does not give one
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Groq => "Groq",
            ProviderKind::HuggingFace => "HuggingFace",
        }
    }

    /// Prefix of the environment variables for this backend
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI",
            ProviderKind::Groq => "GROQ",
            ProviderKind::HuggingFace => "HUGGINGFACE",
        }
    }

    pub fn default_priority(&self) -> i32 {
        match self {
            ProviderKind::Gemini => 1,
            ProviderKind::Groq => 2,
            ProviderKind::HuggingFace => 3,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-pro",
            ProviderKind::Groq => "mixtral-8x7b-32768",
            ProviderKind::HuggingFace => "meta-llama/Llama-2-70b-chat-hf",
        }
    }
}

/// Provider credential. Never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolved, immutable settings for one provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub name: String,
    pub kind: ProviderKind,
    /// Lower values are tried first
    pub priority: i32,
    pub api_key: Option<ApiKey>,
    pub model: String,
    /// Base URL override; the backend's public endpoint otherwise
    pub endpoint: Option<String>,
    pub enabled: bool,
    /// Overrides the router-wide timeout for this provider
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            name: kind.display_name().to_string(),
            kind,
            priority: kind.default_priority(),
            api_key: None,
            model: kind.default_model().to_string(),
            endpoint: None,
            enabled: true,
            timeout: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_redacted() {
        let config = ProviderConfig::new(ProviderKind::Groq).with_api_key("gsk_secret_value");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("gsk_secret_value"));
        assert!(printed.contains("ApiKey(***)"));
    }

    #[test]
    fn test_kind_defaults() {
        let gemini = ProviderConfig::new(ProviderKind::Gemini);
        assert_eq!(gemini.name, "Gemini");
        assert_eq!(gemini.priority, 1);
        assert_eq!(gemini.model, "gemini-pro");

        let hf = ProviderConfig::new(ProviderKind::HuggingFace);
        assert_eq!(hf.priority, 3);
        assert_eq!(hf.kind.env_prefix(), "HUGGINGFACE");
    }

    #[test]
    fn test_kind_parses_lowercase() {
        let kind: ProviderKind = serde_yaml::from_str("huggingface").unwrap();
        assert_eq!(kind, ProviderKind::HuggingFace);
    }
}
