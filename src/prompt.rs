//! Instructional prompt shared by the live providers

use crate::types::GeneratedStoryMap;
use std::fmt::Write;
use std::sync::LazyLock;

/// Title every story map must use for its enabling-work epic
pub const INFRASTRUCTURE_EPIC: &str = "Infrastructure & Technical";

static STORY_MAP_SCHEMA: LazyLock<String> = LazyLock::new(|| {
    let schema = schemars::schema_for!(GeneratedStoryMap);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
});

pub fn create_system_prompt() -> String {
    let mut prompt = String::from(
        "You are an experienced product manager and agile coach who builds user story maps. \
        Your task is to turn a product description into a story map of epics, features and tasks.

        Follow these guidelines exactly:

        1. Epics are large areas of user value, ordered the way a user would move through the product.
        2. Each epic contains 2 to 4 features; each feature contains 2 to 5 tasks.
        3. Write user-facing tasks as user stories: 'As a <user>, I want <goal> so that <benefit>'.
        4. Give every task a priority of exactly 'high', 'medium' or 'low'.
        5. Give every task an effort estimate in days, such as '2 days'.
        6. Give every task 2 to 4 concrete, testable acceptance criteria.
        7. Infer the product type (e-commerce, social, productivity, content, marketplace, \
        internal tool, ...) and let it shape which enabling work matters most.
        8. Only describe functionality that follows from the product description.
        9. Keep titles under eight words and descriptions to a single sentence.
      ",
    );

    write!(
        prompt,
        "
        Always include an epic titled exactly \"{INFRASTRUCTURE_EPIC}\". It holds enabling stories: \
        technical, non-functional work users never see directly but the product cannot ship without. \
        Cover at least authentication and authorization, data storage and migrations, \
        observability (logging, metrics, alerting), and security (TLS, secrets, rate limiting). \
        Group that work into a \"Security & Performance\" feature and a \"Data Management\" feature, \
        adding further features if the product type calls for them. \
        Phrase enabling stories from the team's point of view, e.g. \
        'As a developer, I need centralized logging so that incidents can be diagnosed'.
      "
    )
    .unwrap_or_default();

    prompt.push_str(
        "
        Your response must be a single valid JSON object and nothing else: \
        no markdown, no code fences, no explanations before or after it. \
        Be sure to quote newlines and any other control characters inside strings.

        The JSON object must conform to the following schema:
        ",
    );
    prompt.push_str(&STORY_MAP_SCHEMA);

    prompt
}

pub fn create_user_prompt(product_description: &str) -> String {
    format!(
        "Create a story map for the following product.\n\n\
        Product description:\n{}\n\n\
        Respond with the JSON object only.",
        product_description.trim()
    )
}

/// System and user prompt joined for providers without a system role
pub fn create_combined_prompt(product_description: &str) -> String {
    format!(
        "{}\n\n{}",
        create_system_prompt(),
        create_user_prompt(product_description)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_requires_infrastructure_epic() {
        let prompt = create_system_prompt();
        assert!(prompt.contains("\"Infrastructure & Technical\""));
        assert!(prompt.contains("Security & Performance"));
        assert!(prompt.contains("Data Management"));
    }

    #[test]
    fn test_system_prompt_sets_length_limits() {
        let prompt = create_system_prompt();
        assert!(prompt.contains("9. Keep titles under eight words"));
        assert!(!prompt.contains("YAPPING"));
    }

    #[test]
    fn test_system_prompt_embeds_schema() {
        let prompt = create_system_prompt();
        assert!(prompt.contains("acceptance_criteria"));
        assert!(prompt.contains("\"epics\""));
    }

    #[test]
    fn test_user_prompt_embeds_description() {
        let prompt = create_user_prompt("  A marketplace for used bikes  ");
        assert!(prompt.contains("Product description:\nA marketplace for used bikes\n"));
    }
}
