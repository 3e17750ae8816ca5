//! Story map provider configuration.
//!
//! Single source of truth for supported providers and their defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Supported story map providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    DeepSeek,
    Gemini,
    #[default]
    Mock,
}

impl Provider {
    /// All available providers
    pub const ALL: &'static [Provider] = &[Provider::DeepSeek, Provider::Gemini, Provider::Mock];

    /// Providers backed by a remote text-generation endpoint
    pub const LIVE: &'static [Provider] = &[Provider::DeepSeek, Provider::Gemini];

    /// Provider name as used in config files and CLI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek",
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }

    /// Human readable name for selection lists
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DeepSeek => "DeepSeek",
            Self::Gemini => "Google Gemini",
            Self::Mock => "Mock (templates)",
        }
    }

    /// Default model for the provider, empty for mock
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek-chat",
            Self::Gemini => "gemini-2.0-flash",
            Self::Mock => "",
        }
    }

    /// Default endpoint root, empty for mock
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::DeepSeek => "https://api.deepseek.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Mock => "",
        }
    }

    /// Output token budget sent with each request
    pub const fn default_max_tokens(&self) -> u32 {
        match self {
            Self::DeepSeek => 4000,
            Self::Gemini => 8192,
            Self::Mock => 0,
        }
    }

    /// Environment variable name for the API key
    pub const fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::DeepSeek => Some("DEEPSEEK_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Mock => None,
        }
    }

    /// Environment variable name for a base URL override
    pub const fn base_url_env(&self) -> Option<&'static str> {
        match self {
            Self::DeepSeek => Some("DEEPSEEK_BASE_URL"),
            Self::Gemini => Some("GEMINI_BASE_URL"),
            Self::Mock => None,
        }
    }

    pub const fn is_live(&self) -> bool {
        !matches!(self, Self::Mock)
    }

    /// Get all provider names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        // "google" is accepted as an alias for gemini
        let normalized = if lower == "google" { "gemini" } else { &lower };

        Self::ALL
            .iter()
            .find(|p| p.name() == normalized)
            .copied()
            .ok_or_else(|| ProviderError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provider selection error
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown provider: {0}. Supported: deepseek, gemini, mock")]
    Unknown(String),
}

/// Per-provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (loaded from env or config)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Model name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    /// Endpoint root override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Output token budget override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Additional provider-specific generation params
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub additional_params: HashMap<String, String>,
}

impl ProviderConfig {
    /// Create config with defaults for a provider
    pub fn with_defaults(provider: Provider) -> Self {
        Self {
            api_key: String::new(),
            model: provider.default_model().to_string(),
            base_url: None,
            max_tokens: None,
            additional_params: HashMap::new(),
        }
    }

    /// Get effective model (configured or default)
    pub fn effective_model(&self, provider: Provider) -> &str {
        if self.model.is_empty() {
            provider.default_model()
        } else {
            &self.model
        }
    }

    /// Get effective base URL without a trailing slash
    pub fn effective_base_url(&self, provider: Provider) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| provider.default_base_url())
            .trim_end_matches('/')
    }

    /// Get effective output token budget
    pub fn effective_max_tokens(&self, provider: Provider) -> u32 {
        self.max_tokens
            .unwrap_or_else(|| provider.default_max_tokens())
    }

    /// Check if this config has a usable API key
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("deepseek".parse::<Provider>().ok(), Some(Provider::DeepSeek));
        assert_eq!("GEMINI".parse::<Provider>().ok(), Some(Provider::Gemini));
        assert_eq!("google".parse::<Provider>().ok(), Some(Provider::Gemini));
        assert_eq!(" mock ".parse::<Provider>().ok(), Some(Provider::Mock));
        assert!("openai".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(Provider::DeepSeek.default_model(), "deepseek-chat");
        assert_eq!(Provider::Gemini.api_key_env(), Some("GEMINI_API_KEY"));
        assert_eq!(Provider::Mock.api_key_env(), None);
        assert!(!Provider::Mock.is_live());
        assert_eq!(Provider::LIVE.len(), 2);
    }

    #[test]
    fn test_provider_config_effective_values() {
        let mut config = ProviderConfig::with_defaults(Provider::Gemini);
        assert_eq!(config.effective_model(Provider::Gemini), "gemini-2.0-flash");
        assert_eq!(
            config.effective_base_url(Provider::Gemini),
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.effective_max_tokens(Provider::Gemini), 8192);

        config.base_url = Some("http://127.0.0.1:9000/".to_string());
        config.max_tokens = Some(512);
        assert_eq!(
            config.effective_base_url(Provider::Gemini),
            "http://127.0.0.1:9000"
        );
        assert_eq!(config.effective_max_tokens(Provider::Gemini), 512);
    }

    #[test]
    fn test_blank_api_key_is_not_configured() {
        let mut config = ProviderConfig::with_defaults(Provider::DeepSeek);
        assert!(!config.has_api_key());
        config.api_key = "   ".to_string();
        assert!(!config.has_api_key());
        config.api_key = "sk-test".to_string();
        assert!(config.has_api_key());
    }
}
