//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::domain::entities::{ApiKey, ProviderConfig, ProviderKind, DEFAULT_MAX_TOKENS};

/// Seconds a provider gets before the router moves on
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AiConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
    #[serde(default)]
    pub providers: Vec<ProviderSettings>,
}

/// Provider entry as written in the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: Option<ProviderKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Unset means "enabled when an API key is present"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ProviderSettings {
    fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind: Some(kind),
            priority: Some(kind.default_priority()),
            model: Some(kind.default_model().to_string()),
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                default_max_tokens: DEFAULT_MAX_TOKENS,
                providers: ProviderKind::ALL.iter().map(|k| ProviderSettings::for_kind(*k)).collect(),
            },
        }
    }
}

impl AppConfig {
    /// Load from a YAML file, then apply environment overrides
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml_str(&content)?.apply_env(|key| std::env::var(key).ok())
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Use the file when it exists, the environment otherwise
    pub fn load_or_env(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using environment", path.display());
            Self::from_env()
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Overlay values from an environment lookup
    ///
    /// Per-backend variables (`GROQ_API_KEY`, `GROQ_MODEL`, `GROQ_ENABLED`,
    /// `GROQ_PRIORITY`, `GROQ_ENDPOINT`, ...) apply to the first entry of that
    /// kind. A key for a backend with no entry adds one.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(secs) = get("AI_PROVIDER_TIMEOUT_SECS") {
            self.ai.timeout_secs = parse_value("AI_PROVIDER_TIMEOUT_SECS", &secs)?;
        }
        if let Some(tokens) = get("AI_MAX_TOKENS") {
            self.ai.default_max_tokens = parse_value("AI_MAX_TOKENS", &tokens)?;
        }

        for kind in ProviderKind::ALL {
            let prefix = kind.env_prefix();
            let var = |suffix: &str| get(&format!("{}_{}", prefix, suffix));

            let api_key = var("API_KEY");
            let index = match self.ai.providers.iter().position(|p| p.kind == Some(kind)) {
                Some(index) => index,
                None if api_key.is_some() => {
                    self.ai.providers.push(ProviderSettings::for_kind(kind));
                    self.ai.providers.len() - 1
                }
                None => continue,
            };
            let settings = &mut self.ai.providers[index];

            if let Some(key) = api_key {
                settings.api_key = Some(ApiKey::new(key));
            }
            if let Some(model) = var("MODEL") {
                settings.model = Some(model);
            }
            if let Some(endpoint) = var("ENDPOINT") {
                settings.endpoint = Some(endpoint);
            }
            if let Some(enabled) = var("ENABLED") {
                settings.enabled = Some(parse_bool(&format!("{}_ENABLED", prefix), &enabled)?);
            }
            if let Some(priority) = var("PRIORITY") {
                settings.priority = Some(parse_value(&format!("{}_PRIORITY", prefix), &priority)?);
            }
        }

        Ok(self)
    }

    /// Router-wide timeout for a single provider call
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.ai.timeout_secs)
    }

    /// Resolve file entries into validated provider settings
    pub fn provider_configs(&self) -> Result<Vec<ProviderConfig>, ConfigError> {
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("timeout-secs must be greater than 0".to_string()));
        }

        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(self.ai.providers.len());

        for (index, settings) in self.ai.providers.iter().enumerate() {
            let kind = settings
                .kind
                .ok_or_else(|| ConfigError::MissingField(format!("providers[{}].kind", index)))?;
            let name = settings
                .name
                .clone()
                .unwrap_or_else(|| kind.display_name().to_string());

            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateProvider(name));
            }

            let enabled = match (settings.enabled, &settings.api_key) {
                (Some(true), None) => {
                    return Err(ConfigError::MissingField(format!("{} api-key", name)));
                }
                (Some(enabled), _) => enabled,
                (None, key) => key.is_some(),
            };

            let timeout = match settings.timeout_secs {
                Some(0) => {
                    return Err(ConfigError::InvalidValue(format!("{} timeout-secs must be greater than 0", name)));
                }
                Some(secs) => Some(Duration::from_secs(secs)),
                None => None,
            };

            resolved.push(ProviderConfig {
                name,
                kind,
                priority: settings.priority.unwrap_or_else(|| kind.default_priority()),
                api_key: settings.api_key.clone(),
                model: settings
                    .model
                    .clone()
                    .unwrap_or_else(|| kind.default_model().to_string()),
                endpoint: settings.endpoint.clone(),
                enabled,
                timeout,
            });
        }

        Ok(resolved)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{}={}", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!("{}={}", key, value))),
    }
}
