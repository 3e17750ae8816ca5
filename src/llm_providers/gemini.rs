use super::{ClientError, StoryMapClient, TEMPERATURE, apply_additional_params, send_json};
use crate::log_debug;
use crate::prompt::create_combined_prompt;
use crate::providers::{Provider, ProviderConfig};
use crate::response::parse_story_map;
use crate::types::GeneratedStoryMap;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

/// Story map client for the Gemini API
pub struct GeminiClient {
    config: ProviderConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a new instance of `GeminiClient` with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut request_body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {"text": prompt}
                    ]
                }
            ],
            "generationConfig": {
                // Model is specified in the URL, not here
                "temperature": TEMPERATURE,
                "maxOutputTokens": self.config.effective_max_tokens(Provider::Gemini),
                "response_mime_type": "application/json"
            }
        });

        if let Some(generation_config) = request_body["generationConfig"].as_object_mut() {
            apply_additional_params(
                generation_config,
                &self.config.additional_params,
                &["temperature", "maxOutputTokens"],
            );
        }

        request_body
    }
}

#[async_trait]
impl StoryMapClient for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    /// Generates a story map using the Gemini API
    async fn generate(&self, product_description: &str) -> Result<GeneratedStoryMap, ClientError> {
        if !self.is_configured() {
            return Err(ClientError::Configuration(
                Provider::Gemini.display_name().to_string(),
            ));
        }

        let model = self.config.effective_model(Provider::Gemini);
        let api_url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.effective_base_url(Provider::Gemini),
            model
        );
        log_debug!("Requesting story map from Gemini model {}", model);

        let request = self
            .client
            .post(api_url)
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(&self.request_body(&create_combined_prompt(product_description)));
        let response_body = send_json(Provider::Gemini, request).await?;

        // The response format is:
        // { "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }
        let content = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ClientError::Provider("Failed to extract content from Gemini API response".to_string())
            })?;

        parse_story_map(content)
    }
}
