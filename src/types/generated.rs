//! Canonical generation shape

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effort used when a task arrives without one
pub const DEFAULT_EFFORT: &str = "2 days";

/// Placeholder used when a task arrives without acceptance criteria
pub const DEFAULT_ACCEPTANCE_CRITERION: &str = "Acceptance criteria to be defined";

/// Task priority
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: &'static [Priority] = &[Priority::High, Priority::Medium, Priority::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Lenient parse used on model output: trims and ignores case
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        Self::ALL.iter().copied().find(|p| p.as_str() == normalized)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A story map as produced by a provider or the template bank
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStoryMap {
    /// Short name of the product
    pub title: String,
    /// One or two sentences describing the product
    pub description: String,
    /// Epics in delivery order
    pub epics: Vec<GeneratedEpic>,
}

/// Largest grouping of related functionality
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEpic {
    pub title: String,
    pub description: String,
    pub features: Vec<GeneratedFeature>,
}

/// Group of tasks within an epic
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFeature {
    pub title: String,
    pub description: String,
    pub tasks: Vec<GeneratedTask>,
}

/// Smallest unit of work
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTask {
    /// User story or enabling story title
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Free-form estimate such as "3 days"
    pub effort: String,
    /// Testable conditions, never empty
    pub acceptance_criteria: Vec<String>,
}

impl GeneratedStoryMap {
    /// Finds an epic by its exact title
    pub fn epic(&self, title: &str) -> Option<&GeneratedEpic> {
        self.epics.iter().find(|e| e.title == title)
    }

    pub fn task_count(&self) -> usize {
        self.epics
            .iter()
            .flat_map(|e| &e.features)
            .map(|f| f.tasks.len())
            .sum()
    }
}

impl GeneratedEpic {
    pub fn feature(&self, title: &str) -> Option<&GeneratedFeature> {
        self.features.iter().find(|f| f.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse_lenient() {
        assert_eq!(Priority::parse_lenient("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse_lenient("  low "), Some(Priority::Low));
        assert_eq!(Priority::parse_lenient("urgent"), None);
        assert_eq!(Priority::parse_lenient(""), None);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::Medium).expect("serialize priority");
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_task_uses_snake_case_acceptance_criteria() {
        let task = GeneratedTask {
            title: "Sign up".to_string(),
            description: String::new(),
            priority: Priority::High,
            effort: "1 day".to_string(),
            acceptance_criteria: vec!["Form validates email".to_string()],
        };
        let value = serde_json::to_value(&task).expect("serialize task");
        assert!(value.get("acceptance_criteria").is_some());
    }
}
