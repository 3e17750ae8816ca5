use story_mapper::llm_providers::{ClientError, DeepSeekClient, GeminiClient, StoryMapClient};
use story_mapper::providers::{Provider, ProviderConfig};
use story_mapper::types::Priority;

use test_utils::{StubServer, deepseek_reply, gemini_reply, story_map_json};

fn deepseek_at(base_url: &str) -> DeepSeekClient {
    let mut config = ProviderConfig::with_defaults(Provider::DeepSeek);
    config.api_key = "sk-test".to_string();
    config.base_url = Some(base_url.to_string());
    DeepSeekClient::new(config)
}

fn gemini_at(base_url: &str) -> GeminiClient {
    let mut config = ProviderConfig::with_defaults(Provider::Gemini);
    config.api_key = "g-test".to_string();
    config.base_url = Some(base_url.to_string());
    GeminiClient::new(config)
}

#[tokio::test]
async fn test_deepseek_parses_prose_wrapped_json() {
    let content = format!(
        "Here is the story map you asked for:\n\n{}\n\nLet me know if you want changes.",
        story_map_json()
    );
    let server = StubServer::start(200, deepseek_reply(&content)).await;

    let map = deepseek_at(&server.base_url)
        .generate("A marketplace for used bikes")
        .await
        .expect("DeepSeek generation should succeed");

    assert_eq!(map.title, "Bike Marketplace");
    assert_eq!(map.epics.len(), 2);

    let tls = &map.epics[1].features[0].tasks[0];
    assert_eq!(tls.priority, Priority::Medium);
    assert_eq!(tls.description, "");
    assert_eq!(tls.acceptance_criteria, vec!["Acceptance criteria to be defined"]);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = requests[0].to_lowercase();
    assert!(request.starts_with("post /chat/completions "));
    assert!(request.contains("authorization: bearer sk-test"));
    assert!(request.contains("a marketplace for used bikes"));
}

#[tokio::test]
async fn test_gemini_parses_fenced_json() {
    let text = format!("```json\n{}\n```", story_map_json());
    let server = StubServer::start(200, gemini_reply(&text)).await;

    let map = gemini_at(&server.base_url)
        .generate("A marketplace for used bikes")
        .await
        .expect("Gemini generation should succeed");

    assert_eq!(map.description, "Buy and sell used bikes");
    assert_eq!(map.epics[0].features[0].tasks[0].priority, Priority::High);

    let requests = server.requests();
    assert!(requests[0].starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent "));
    assert!(requests[0].to_lowercase().contains("x-goog-api-key: g-test"));
    assert!(requests[0].contains("\"temperature\":0.7"));
}

#[tokio::test]
async fn test_http_error_status_is_provider_error() {
    let server = StubServer::start(500, "{\"error\": \"overloaded\"}".to_string()).await;

    let result = deepseek_at(&server.base_url).generate("anything").await;

    match result {
        Err(ClientError::Provider(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reply_without_json_is_provider_error() {
    let server = StubServer::start(200, gemini_reply("Sorry, I can't do that.")).await;

    let result = gemini_at(&server.base_url).generate("anything").await;

    assert!(matches!(result, Err(ClientError::Provider(_))));
}

#[tokio::test]
async fn test_missing_content_is_provider_error() {
    let server = StubServer::start(200, "{\"choices\": []}".to_string()).await;

    let result = deepseek_at(&server.base_url).generate("anything").await;

    assert!(matches!(result, Err(ClientError::Provider(_))));
}

#[tokio::test]
async fn test_unrelated_json_is_validation_error() {
    let server = StubServer::start(200, deepseek_reply("{\"answer\": 42}")).await;

    let result = deepseek_at(&server.base_url).generate("anything").await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_provider_error() {
    // Nothing listens on port 1
    let result = gemini_at("http://127.0.0.1:1").generate("anything").await;

    assert!(matches!(result, Err(ClientError::Provider(_))));
}

#[tokio::test]
async fn test_transport_errors_do_not_leak_api_keys() {
    let mut config = ProviderConfig::with_defaults(Provider::Gemini);
    config.api_key = "SECRET-KEY-123".to_string();
    config.base_url = Some("http://127.0.0.1:1".to_string());

    let err = GeminiClient::new(config)
        .generate("anything")
        .await
        .expect_err("nothing listens on port 1");

    assert!(matches!(err, ClientError::Provider(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_gemini_key_is_not_in_request_url() {
    let server = StubServer::start(200, gemini_reply(&story_map_json().to_string())).await;

    gemini_at(&server.base_url)
        .generate("A bike marketplace")
        .await
        .expect("Gemini generation should succeed");

    let requests = server.requests();
    let request_line = requests[0].lines().next().unwrap_or_default();
    assert!(!request_line.contains("g-test"));
}

#[test]
fn test_is_configured_never_panics() {
    for key in ["", " ", "\t\n", "k"] {
        let mut config = ProviderConfig::with_defaults(Provider::Gemini);
        config.api_key = key.to_string();
        let client = GeminiClient::new(config);
        assert_eq!(client.is_configured(), key == "k");
    }
}
