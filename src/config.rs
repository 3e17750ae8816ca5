use crate::log_debug;
use crate::providers::Provider;
pub use crate::providers::ProviderConfig;

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration structure for story-mapper
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Provider used when none is given on the command line
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Artificial latency for the mock provider, in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
    /// Whether to show HTTP client logs when logging is enabled
    #[serde(default)]
    pub verbose_logging: bool,
    /// API keys from the file that the environment replaced, restored on save
    #[serde(skip)]
    pub file_api_keys: HashMap<String, String>,
}

fn default_provider() -> String {
    Provider::Mock.name().to_string()
}

/// Matches the latency of a typical live generation
fn default_mock_delay_ms() -> u64 {
    2000
}

impl Config {
    /// Load the configuration file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        log_debug!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load a configuration file without environment overrides.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&config_content).map_err(|e| {
            anyhow!(
                "Invalid configuration file format: {}. Please check {} for syntax errors.",
                e,
                path.display()
            )
        })?;
        config.ensure_live_providers();
        Ok(config)
    }

    /// Load `path` and apply environment overrides. An unreadable or invalid
    /// file degrades to the defaults, and the load error is handed back.
    pub fn load_or_default<F>(path: &Path, lookup: F) -> (Self, Option<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, error) = match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.apply_env_overrides(lookup);
        (config, error)
    }

    /// Apply API key and base URL overrides. `lookup` returns the value of an
    /// environment variable, or `None` when it is unset or unreadable.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for provider in Provider::LIVE {
            let entry = self
                .providers
                .entry(provider.name().to_string())
                .or_insert_with(|| ProviderConfig::with_defaults(*provider));

            if let Some(key) = provider
                .api_key_env()
                .and_then(&lookup)
                .filter(|key| !key.trim().is_empty())
            {
                log_debug!("Using API key for {} from environment", provider);
                self.file_api_keys
                    .entry(provider.name().to_string())
                    .or_insert_with(|| entry.api_key.clone());
                entry.api_key = key;
            }

            if let Some(url) = provider
                .base_url_env()
                .and_then(&lookup)
                .filter(|url| !url.trim().is_empty())
            {
                log_debug!("Using base URL for {} from environment: {}", provider, url);
                entry.base_url = Some(url);
            }
        }
    }

    /// Save the configuration to the default file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the configuration, keeping environment-only keys out of the file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut persisted = self.clone();
        for (provider, file_key) in &self.file_api_keys {
            if let Some(entry) = persisted.providers.get_mut(provider) {
                entry.api_key.clone_from(file_key);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_content = toml::to_string_pretty(&persisted)?;
        fs::write(path, config_content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        log_debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("story-mapper");
        path.push("config.toml");
        Ok(path)
    }

    fn ensure_live_providers(&mut self) {
        for provider in Provider::LIVE {
            self.providers
                .entry(provider.name().to_string())
                .or_insert_with(|| ProviderConfig::with_defaults(*provider));
        }
    }

    /// Configuration for a provider, falling back to its defaults
    pub fn provider_config(&self, provider: Provider) -> ProviderConfig {
        self.providers
            .get(provider.name())
            .cloned()
            .unwrap_or_else(|| ProviderConfig::with_defaults(provider))
    }

    /// The configured default provider, or mock if the name is not recognized
    pub fn default_provider(&self) -> Provider {
        self.default_provider.parse().unwrap_or_else(|e| {
            log_debug!("Ignoring configured default provider: {}", e);
            Provider::Mock
        })
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// Update the configuration with new values
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        provider: Option<Provider>,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        additional_params: Option<HashMap<String, String>>,
        mock_delay_ms: Option<u64>,
    ) -> Result<bool> {
        let mut changes_made = false;

        if let Some(provider) = provider
            && self.default_provider != provider.name()
        {
            self.default_provider = provider.name().to_string();
            changes_made = true;
        }

        if let Some(delay) = mock_delay_ms
            && self.mock_delay_ms != delay
        {
            self.mock_delay_ms = delay;
            changes_made = true;
        }

        let provider_settings = api_key.is_some()
            || model.is_some()
            || base_url.is_some()
            || max_tokens.is_some()
            || additional_params.is_some();
        if !provider_settings {
            log_debug!("Configuration updated: {:?}", self);
            return Ok(changes_made);
        }

        let target = self.default_provider();
        if !target.is_live() {
            return Err(anyhow!(
                "The mock provider has no settings. Pass --provider deepseek or --provider gemini."
            ));
        }

        let provider_config = self
            .providers
            .entry(target.name().to_string())
            .or_insert_with(|| ProviderConfig::with_defaults(target));

        if let Some(key) = api_key {
            // An explicit key is persisted even when it matches the environment
            if self.file_api_keys.remove(target.name()).is_some() {
                changes_made = true;
            }
            if provider_config.api_key != key {
                provider_config.api_key = key;
                changes_made = true;
            }
        }
        if let Some(model) = model
            && provider_config.model != model
        {
            provider_config.model = model;
            changes_made = true;
        }
        if let Some(url) = base_url
            && provider_config.base_url.as_deref() != Some(url.as_str())
        {
            provider_config.base_url = Some(url);
            changes_made = true;
        }
        if let Some(limit) = max_tokens
            && provider_config.max_tokens != Some(limit)
        {
            provider_config.max_tokens = Some(limit);
            changes_made = true;
        }
        if let Some(params) = additional_params
            && !params.is_empty()
        {
            provider_config.additional_params.extend(params);
            changes_made = true;
        }

        log_debug!("Configuration updated: {:?}", self);
        Ok(changes_made)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            mock_delay_ms: default_mock_delay_ms(),
            verbose_logging: false,
            file_api_keys: HashMap::new(),
        };
        config.ensure_live_providers();
        config
    }
}

/// Parse `key=value` pairs from the command line
pub fn parse_additional_params(params: &[String]) -> HashMap<String, String> {
    params
        .iter()
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_provider(), Provider::Mock);
        assert_eq!(config.mock_delay(), Duration::from_secs(2));
        assert!(config.providers.contains_key("deepseek"));
        assert!(config.providers.contains_key("gemini"));
        assert!(!config.provider_config(Provider::Gemini).has_api_key());
    }

    #[test]
    fn test_unknown_default_provider_falls_back_to_mock() {
        let config = Config {
            default_provider: "openai".to_string(),
            ..Config::default()
        };
        assert_eq!(config.default_provider(), Provider::Mock);
    }

    #[test]
    fn test_parse_additional_params() {
        let params = parse_additional_params(&[
            "top_p=0.9".to_string(),
            "broken".to_string(),
            "=value".to_string(),
            " stop = END ".to_string(),
        ]);
        assert_eq!(params.len(), 2);
        assert_eq!(params["top_p"], "0.9");
        assert_eq!(params["stop"], "END");
    }

    #[test]
    fn test_env_overrides_replace_keys_and_urls() {
        let mut config = Config::default();
        config.apply_env_overrides(|key| match key {
            "DEEPSEEK_API_KEY" => Some("sk-env".to_string()),
            "GEMINI_API_KEY" => Some("   ".to_string()),
            "GEMINI_BASE_URL" => Some("http://localhost:8080".to_string()),
            _ => None,
        });

        assert_eq!(config.provider_config(Provider::DeepSeek).api_key, "sk-env");
        assert!(!config.provider_config(Provider::Gemini).has_api_key());
        assert_eq!(
            config.provider_config(Provider::Gemini).base_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_update_rejects_mock_provider_settings() {
        let mut config = Config::default();
        let result = config.update(
            Some(Provider::Mock),
            Some("key".to_string()),
            None,
            None,
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_sets_provider_values() -> Result<()> {
        let mut config = Config::default();
        let changed = config.update(
            Some(Provider::Gemini),
            Some("g-key".to_string()),
            Some("gemini-2.5-flash".to_string()),
            None,
            Some(1024),
            None,
            Some(0),
        )?;

        assert!(changed);
        assert_eq!(config.default_provider(), Provider::Gemini);
        let gemini = config.provider_config(Provider::Gemini);
        assert_eq!(gemini.api_key, "g-key");
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert_eq!(gemini.max_tokens, Some(1024));
        assert_eq!(config.mock_delay(), Duration::ZERO);
        Ok(())
    }
}
