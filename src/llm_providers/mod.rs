//! Live story map providers
//!
//! Each client wraps one text-generation endpoint behind [`StoryMapClient`].
//! Clients hold only configuration and a shared HTTP client, so one instance
//! serves every request for the life of the process.

mod deepseek;
mod gemini;

pub use deepseek::DeepSeekClient;
pub use gemini::GeminiClient;

use crate::providers::Provider;
use crate::types::GeneratedStoryMap;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

/// Sampling temperature sent with every generation request
pub const TEMPERATURE: f64 = 0.7;

/// Failure modes of a live provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No credential configured
    #[error("{0} is not configured: missing API key")]
    Configuration(String),
    /// Transport failure, non-success status, or unparsable reply
    #[error("Provider request failed: {0}")]
    Provider(String),
    /// Reply parsed but does not resemble a story map
    #[error("Invalid story map response: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry credentials
        Self::Provider(err.without_url().to_string())
    }
}

/// Capability shared by every live provider
#[async_trait]
pub trait StoryMapClient: Send + Sync {
    /// Which provider this client talks to
    fn provider(&self) -> Provider;

    /// True when a non-blank credential is present
    fn is_configured(&self) -> bool;

    /// Generate a normalized story map for a product description
    async fn generate(&self, product_description: &str) -> Result<GeneratedStoryMap, ClientError>;
}

/// Send a JSON request and return the decoded body, mapping HTTP failures
async fn send_json(provider: Provider, request: RequestBuilder) -> Result<Value, ClientError> {
    let response = request
        .header("Content-Type", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(ClientError::Provider(format!(
            "{} API request failed with status {}: {}",
            provider.display_name(),
            status,
            text
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ClientError::Provider(format!("Response body is not JSON: {}", e.without_url())))
}

/// Merge user-supplied params into a request object, skipping reserved keys
fn apply_additional_params<S: ::std::hash::BuildHasher>(
    target: &mut Map<String, Value>,
    params: &HashMap<String, String, S>,
    reserved: &[&str],
) {
    for (key, value) in params {
        if reserved.contains(&key.as_str()) {
            continue;
        }
        // Try to convert the value to a number first if it looks like one
        if let Ok(num_val) = value.parse::<f64>() {
            target.insert(key.clone(), json!(num_val));
        } else {
            target.insert(key.clone(), json!(value));
        }
    }
}
