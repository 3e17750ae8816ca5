use super::{ClientError, StoryMapClient, TEMPERATURE, apply_additional_params, send_json};
use crate::log_debug;
use crate::prompt::{create_system_prompt, create_user_prompt};
use crate::providers::{Provider, ProviderConfig};
use crate::response::parse_story_map;
use crate::types::GeneratedStoryMap;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Story map client for the DeepSeek chat completions API
pub struct DeepSeekClient {
    config: ProviderConfig,
    client: Client,
}

impl DeepSeekClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request_body(&self, product_description: &str) -> Value {
        let mut request_body = json!({
            "model": self.config.effective_model(Provider::DeepSeek),
            "messages": [
                {"role": "system", "content": create_system_prompt()},
                {"role": "user", "content": create_user_prompt(product_description)}
            ],
            "temperature": TEMPERATURE,
            "max_tokens": self.config.effective_max_tokens(Provider::DeepSeek),
            "stream": false
        });

        if let Some(body) = request_body.as_object_mut() {
            apply_additional_params(
                body,
                &self.config.additional_params,
                &["model", "messages", "temperature", "max_tokens", "stream"],
            );
        }

        request_body
    }
}

#[async_trait]
impl StoryMapClient for DeepSeekClient {
    fn provider(&self) -> Provider {
        Provider::DeepSeek
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    async fn generate(&self, product_description: &str) -> Result<GeneratedStoryMap, ClientError> {
        if !self.is_configured() {
            return Err(ClientError::Configuration(
                Provider::DeepSeek.display_name().to_string(),
            ));
        }

        let api_url = format!(
            "{}/chat/completions",
            self.config.effective_base_url(Provider::DeepSeek)
        );
        log_debug!(
            "Requesting story map from DeepSeek model {}",
            self.config.effective_model(Provider::DeepSeek)
        );

        let request = self
            .client
            .post(api_url)
            .bearer_auth(self.config.api_key.trim())
            .json(&self.request_body(product_description));
        let response_body = send_json(Provider::DeepSeek, request).await?;

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ClientError::Provider(
                    "Failed to extract content from DeepSeek API response".to_string(),
                )
            })?;

        parse_story_map(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let mut config = ProviderConfig::with_defaults(Provider::DeepSeek);
        config.max_tokens = Some(2048);
        let body = DeepSeekClient::new(config).request_body("A recipe sharing site");

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["temperature"], json!(0.7));
        assert_eq!(body["max_tokens"], json!(2048));
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(
            body["messages"][1]["content"]
                .as_str()
                .is_some_and(|c| c.contains("A recipe sharing site"))
        );
    }

    #[test]
    fn test_is_configured_tracks_key() {
        let mut config = ProviderConfig::with_defaults(Provider::DeepSeek);
        assert!(!DeepSeekClient::new(config.clone()).is_configured());
        config.api_key = "sk-live".to_string();
        assert!(DeepSeekClient::new(config).is_configured());
    }
}
