//! Response handling for provider replies
//!
//! Models tend to wrap JSON in prose or code fences and to drop or mistype
//! fields. Extraction is fallible; normalization is not.

use crate::llm_providers::ClientError;
use crate::log_debug;
use crate::types::{
    DEFAULT_ACCEPTANCE_CRITERION, DEFAULT_EFFORT, GeneratedEpic, GeneratedFeature,
    GeneratedStoryMap, GeneratedTask, Priority,
};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

const UNTITLED_EPIC: &str = "Untitled Epic";
const UNTITLED_FEATURE: &str = "Untitled Feature";
const UNTITLED_TASK: &str = "Untitled Task";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("Failed to compile code fence pattern")
});

/// Parse a provider reply into a story map
pub fn parse_story_map(text: &str) -> Result<GeneratedStoryMap, ClientError> {
    let value = extract_json(text)?;
    validate_shape(&value)?;
    Ok(normalize_story_map(&value))
}

/// Pull a JSON value out of a possibly prose-wrapped reply
pub fn extract_json(text: &str) -> Result<Value, ClientError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Provider("Empty response from provider".to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let Some(captures) = CODE_FENCE.captures(trimmed)
        && let Some(body) = captures.get(1)
        && let Ok(value) = serde_json::from_str::<Value>(body.as_str().trim())
    {
        log_debug!("Extracted JSON from fenced code block");
        return Ok(value);
    }

    let span = first_balanced_object(trimmed)
        .ok_or_else(|| ClientError::Provider("No JSON object found in response".to_string()))?;

    serde_json::from_str::<Value>(span)
        .map_err(|e| ClientError::Provider(format!("Invalid JSON in response: {e}")))
}

/// Find the first balanced `{...}` span, ignoring braces inside strings
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Reject values that do not resemble a story map at all
pub fn validate_shape(value: &Value) -> Result<(), ClientError> {
    let Some(obj) = value.as_object() else {
        return Err(ClientError::Validation(format!(
            "Expected a JSON object, got {}",
            json_type_name(value)
        )));
    };

    if ["title", "description", "epics"]
        .iter()
        .any(|key| obj.contains_key(*key))
    {
        Ok(())
    } else {
        Err(ClientError::Validation(
            "Response has none of title, description or epics".to_string(),
        ))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fill every missing or mistyped field with its default
pub fn normalize_story_map(value: &Value) -> GeneratedStoryMap {
    GeneratedStoryMap {
        title: string_or(value, "title", ""),
        description: string_or(value, "description", ""),
        epics: list(value, "epics").iter().map(normalize_epic).collect(),
    }
}

fn normalize_epic(value: &Value) -> GeneratedEpic {
    GeneratedEpic {
        title: string_or(value, "title", UNTITLED_EPIC),
        description: string_or(value, "description", ""),
        features: list(value, "features").iter().map(normalize_feature).collect(),
    }
}

fn normalize_feature(value: &Value) -> GeneratedFeature {
    GeneratedFeature {
        title: string_or(value, "title", UNTITLED_FEATURE),
        description: string_or(value, "description", ""),
        tasks: list(value, "tasks").iter().map(normalize_task).collect(),
    }
}

fn normalize_task(value: &Value) -> GeneratedTask {
    let priority = value
        .get("priority")
        .and_then(Value::as_str)
        .and_then(Priority::parse_lenient)
        .unwrap_or_default();

    let mut acceptance_criteria: Vec<String> = list(value, "acceptance_criteria")
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if acceptance_criteria.is_empty() {
        acceptance_criteria.push(DEFAULT_ACCEPTANCE_CRITERION.to_string());
    }

    GeneratedTask {
        title: string_or(value, "title", UNTITLED_TASK),
        description: string_or(value, "description", ""),
        priority,
        effort: string_or(value, "effort", DEFAULT_EFFORT),
        acceptance_criteria,
    }
}

/// Non-empty string field, or the fallback
fn string_or(value: &Value, key: &str, fallback: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Array field, or an empty slice when absent or not an array
fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
