use std::time::{Duration, Instant};
use story_mapper::prompt::INFRASTRUCTURE_EPIC;
use story_mapper::{Config, GeneratedStoryMap, Provider, StoryMapService};

fn instant_service() -> StoryMapService {
    let config = Config {
        mock_delay_ms: 0,
        ..Config::default()
    };
    StoryMapService::new(&config)
}

fn assert_well_formed(map: &GeneratedStoryMap) {
    assert!(!map.epics.is_empty());
    for epic in &map.epics {
        assert!(!epic.title.is_empty());
        assert!(!epic.features.is_empty(), "epic {} has no features", epic.title);
        for feature in &epic.features {
            assert!(!feature.tasks.is_empty(), "feature {} has no tasks", feature.title);
            for task in &feature.tasks {
                assert!(!task.effort.is_empty());
                assert!(!task.acceptance_criteria.is_empty());
            }
        }
    }
}

#[tokio::test]
async fn test_each_template_family_is_reachable() {
    let service = instant_service();
    let cases = [
        ("An e-commerce STORE for vinyl records", "E-commerce Platform"),
        ("A social app for climbers", "Social Network Platform"),
        ("A shared TODO list for families", "Task Management App"),
        ("A weather dashboard", "Product Story Map"),
    ];

    for (description, title) in cases {
        let map = service.generate_story_map(description, Provider::Mock).await;
        assert_eq!(map.title, title, "description: {description}");
        assert_well_formed(&map);
    }
}

#[tokio::test]
async fn test_every_template_has_one_infrastructure_epic() {
    let service = instant_service();

    for description in ["shop", "social", "task", "anything else"] {
        let map = service.generate_story_map(description, Provider::Mock).await;
        let infrastructure = map
            .epics
            .iter()
            .filter(|epic| epic.title == INFRASTRUCTURE_EPIC)
            .count();
        assert_eq!(infrastructure, 1, "description: {description}");
    }
}

#[tokio::test]
async fn test_generic_template_echoes_description() {
    let service = instant_service();

    let map = service
        .generate_story_map("A pottery class booking tool", Provider::Mock)
        .await;

    assert_eq!(map.description, "A pottery class booking tool");
}

#[tokio::test]
async fn test_mock_output_is_deterministic() {
    let service = instant_service();

    let first = service.generate_story_map("A social network", Provider::Mock).await;
    let second = service.generate_story_map("A social network", Provider::Mock).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_mock_delay_comes_from_config() {
    let config = Config {
        mock_delay_ms: 30,
        ..Config::default()
    };
    let service = StoryMapService::new(&config);

    let started = Instant::now();
    service.generate_story_map("shop", Provider::Mock).await;

    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn test_unconfigured_live_provider_uses_templates() {
    let service = instant_service();

    let map = service
        .generate_story_map("A task board for students", Provider::DeepSeek)
        .await;

    assert_eq!(map.title, "Task Management App");
}
