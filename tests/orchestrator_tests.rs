use std::time::Duration;
use story_mapper::llm_providers::{DeepSeekClient, GeminiClient};
use story_mapper::providers::{Provider, ProviderConfig};
use story_mapper::{MockGenerator, StoryMapService};

use test_utils::{StubServer, deepseek_reply, gemini_reply, story_map_json};

fn service_with(deepseek_url: &str, gemini_url: &str) -> StoryMapService {
    let mut deepseek = ProviderConfig::with_defaults(Provider::DeepSeek);
    deepseek.api_key = "sk-test".to_string();
    deepseek.base_url = Some(deepseek_url.to_string());

    let mut gemini = ProviderConfig::with_defaults(Provider::Gemini);
    gemini.api_key = "g-test".to_string();
    gemini.base_url = Some(gemini_url.to_string());

    StoryMapService::with_clients(
        DeepSeekClient::new(deepseek),
        GeminiClient::new(gemini),
        Duration::ZERO,
    )
}

#[tokio::test]
async fn test_live_result_is_returned_on_success() {
    let server = StubServer::start(200, deepseek_reply(&story_map_json().to_string())).await;
    let service = service_with(&server.base_url, "http://127.0.0.1:1");

    let map = service
        .generate_story_map("An online shop for bikes", Provider::DeepSeek)
        .await;

    assert_eq!(map.title, "Bike Marketplace");
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_server_error_falls_back_to_mock() {
    let server = StubServer::start(503, "unavailable".to_string()).await;
    let service = service_with("http://127.0.0.1:1", &server.base_url);
    let description = "An online shop for bikes";

    let map = service.generate_story_map(description, Provider::Gemini).await;

    assert_eq!(map, MockGenerator::new().generate(description));
    assert_eq!(map.title, "E-commerce Platform");
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_malformed_reply_falls_back_to_mock() {
    let server = StubServer::start(200, gemini_reply("[1, 2, 3]")).await;
    let service = service_with("http://127.0.0.1:1", &server.base_url);
    let description = "A team task tracker";

    let map = service.generate_story_map(description, Provider::Gemini).await;

    assert_eq!(map, MockGenerator::new().generate(description));
}

#[tokio::test]
async fn test_tree_from_live_provider_is_addressable() {
    let server = StubServer::start(200, gemini_reply(&story_map_json().to_string())).await;
    let service = service_with("http://127.0.0.1:1", &server.base_url);

    let tree = service
        .generate_story_map_tree("A bike marketplace", Provider::Gemini)
        .await;

    assert_eq!(tree.title, "Bike Marketplace");
    assert_eq!(tree.epics.len(), 2);
    assert_eq!(tree.epics[1].order, 1);
    assert_eq!(tree.tasks().count(), 2);
    assert_ne!(tree.id, tree.epics[0].id);
}

#[test]
fn test_providers_listed_in_fixed_order() {
    let service = service_with("http://127.0.0.1:1", "http://127.0.0.1:1");

    let ids: Vec<Provider> = service.list_providers().iter().map(|p| p.id).collect();

    assert_eq!(ids, vec![Provider::DeepSeek, Provider::Gemini, Provider::Mock]);
    assert!(service.list_providers().iter().all(|p| p.configured));
}
