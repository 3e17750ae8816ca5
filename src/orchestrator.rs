//! Story map generation with provider fallback
//!
//! [`StoryMapService`] is the single recovery boundary: provider failures of
//! any kind are logged and replaced with template output for the same
//! description, so generation itself never fails.

use crate::config::Config;
use crate::converter::to_internal_tree;
use crate::llm_providers::{ClientError, DeepSeekClient, GeminiClient, StoryMapClient};
use crate::mock::MockGenerator;
use crate::providers::Provider;
use crate::types::{GeneratedStoryMap, StoryMap};
use crate::{log_debug, log_info, log_warn};
use serde::Serialize;
use std::time::Duration;

/// Availability of one provider, for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub id: Provider,
    pub display_name: &'static str,
    pub configured: bool,
}

/// Owns one client per live provider for its whole lifetime
pub struct StoryMapService {
    deepseek: DeepSeekClient,
    gemini: GeminiClient,
    mock: MockGenerator,
    mock_delay: Duration,
}

impl StoryMapService {
    /// Build the service from loaded configuration
    pub fn new(config: &Config) -> Self {
        Self::with_clients(
            DeepSeekClient::new(config.provider_config(Provider::DeepSeek)),
            GeminiClient::new(config.provider_config(Provider::Gemini)),
            config.mock_delay(),
        )
    }

    pub fn with_clients(
        deepseek: DeepSeekClient,
        gemini: GeminiClient,
        mock_delay: Duration,
    ) -> Self {
        Self {
            deepseek,
            gemini,
            mock: MockGenerator::new(),
            mock_delay,
        }
    }

    /// Client for a live provider, `None` for mock
    fn client(&self, provider: Provider) -> Option<&dyn StoryMapClient> {
        let client: &dyn StoryMapClient = match provider {
            Provider::DeepSeek => &self.deepseek,
            Provider::Gemini => &self.gemini,
            Provider::Mock => return None,
        };
        Some(client)
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.client(provider)
            .is_none_or(|client| client.is_configured())
    }

    /// Current availability of every provider
    pub fn list_providers(&self) -> Vec<ProviderStatus> {
        Provider::ALL
            .iter()
            .map(|provider| ProviderStatus {
                id: *provider,
                display_name: provider.display_name(),
                configured: self.is_configured(*provider),
            })
            .collect()
    }

    /// Generate a story map. Never fails: falls back to template content.
    #[tracing::instrument(skip(self, product_description), fields(provider = %provider))]
    pub async fn generate_story_map(
        &self,
        product_description: &str,
        provider: Provider,
    ) -> GeneratedStoryMap {
        let Some(client) = self.client(provider) else {
            log_debug!("Generating mock story map after {:?}", self.mock_delay);
            tokio::time::sleep(self.mock_delay).await;
            return self.mock.generate(product_description);
        };

        if !client.is_configured() {
            log_info!(
                "{} is not configured, using mock story map",
                provider.display_name()
            );
            return self.mock.generate(product_description);
        }

        match client.generate(product_description).await {
            Ok(story_map) => {
                log_debug!(
                    "{} returned {} epics and {} tasks",
                    provider.display_name(),
                    story_map.epics.len(),
                    story_map.task_count()
                );
                story_map
            }
            Err(err) => {
                log_fallback(provider, &err);
                self.mock.generate(product_description)
            }
        }
    }

    /// Generate and convert to the addressable tree
    pub async fn generate_story_map_tree(
        &self,
        product_description: &str,
        provider: Provider,
    ) -> StoryMap {
        let generated = self.generate_story_map(product_description, provider).await;
        to_internal_tree(&generated)
    }
}

fn log_fallback(provider: Provider, err: &ClientError) {
    let kind = match err {
        ClientError::Configuration(_) => "configuration",
        ClientError::Provider(_) => "provider",
        ClientError::Validation(_) => "validation",
    };
    log_warn!(
        "{} failed with {} error, falling back to mock story map: {}",
        provider.display_name(),
        kind,
        err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderConfig;

    fn service(deepseek_key: &str) -> StoryMapService {
        let mut deepseek = ProviderConfig::with_defaults(Provider::DeepSeek);
        deepseek.api_key = deepseek_key.to_string();
        StoryMapService::with_clients(
            DeepSeekClient::new(deepseek),
            GeminiClient::new(ProviderConfig::with_defaults(Provider::Gemini)),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_list_providers_reflects_configuration() {
        let statuses = service("sk-test").list_providers();
        assert_eq!(statuses.len(), 3);

        let configured: Vec<(Provider, bool)> =
            statuses.iter().map(|s| (s.id, s.configured)).collect();
        assert_eq!(
            configured,
            vec![
                (Provider::DeepSeek, true),
                (Provider::Gemini, false),
                (Provider::Mock, true),
            ]
        );
        assert_eq!(statuses[1].display_name, "Google Gemini");
    }

    #[tokio::test]
    async fn test_unconfigured_provider_falls_back_to_mock() {
        let service = service("");
        let description = "An online shop for vinyl records";

        let from_deepseek = service
            .generate_story_map(description, Provider::DeepSeek)
            .await;
        let from_mock = service.generate_story_map(description, Provider::Mock).await;

        assert_eq!(from_deepseek, from_mock);
    }

    #[tokio::test]
    async fn test_network_failure_falls_back_to_mock() {
        let mut deepseek = ProviderConfig::with_defaults(Provider::DeepSeek);
        deepseek.api_key = "sk-test".to_string();
        // Nothing listens on port 1
        deepseek.base_url = Some("http://127.0.0.1:1".to_string());
        let service = StoryMapService::with_clients(
            DeepSeekClient::new(deepseek),
            GeminiClient::new(ProviderConfig::with_defaults(Provider::Gemini)),
            Duration::ZERO,
        );

        let description = "A todo list for families";
        let result = service
            .generate_story_map(description, Provider::DeepSeek)
            .await;
        let mock = service.generate_story_map(description, Provider::Mock).await;

        assert_eq!(
            serde_json::to_string(&result).expect("serialize"),
            serde_json::to_string(&mock).expect("serialize")
        );
    }

    #[tokio::test]
    async fn test_mock_provider_waits_for_delay() {
        let service = StoryMapService::with_clients(
            DeepSeekClient::new(ProviderConfig::with_defaults(Provider::DeepSeek)),
            GeminiClient::new(ProviderConfig::with_defaults(Provider::Gemini)),
            Duration::from_millis(50),
        );

        let start = tokio::time::Instant::now();
        let map = service.generate_story_map("anything", Provider::Mock).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(map.description, "anything");
    }

    #[tokio::test]
    async fn test_generate_tree_converts() {
        let tree = service("")
            .generate_story_map_tree("a social app", Provider::Mock)
            .await;
        assert_eq!(tree.title, "Social Network Platform");
        assert!(tree.epics.iter().enumerate().all(|(i, e)| e.order == i));
    }
}
