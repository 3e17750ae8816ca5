//! Addressable story map tree

use super::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Story map with identifiers, ordering and timestamps
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryMap {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub epics: Vec<Epic>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Zero-based position within the map
    pub order: usize,
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Zero-based position within the epic
    pub order: usize,
    pub tasks: Vec<Task>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub status: TaskStatus,
    pub priority: Priority,
    pub estimated_effort: String,
    pub acceptance_criteria: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item type of a task node. Only one kind exists today.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Task,
}

/// Workflow state of a task node. Generated tasks always start as todo.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
}

impl StoryMap {
    /// Iterates every task in epic, feature, task order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.epics
            .iter()
            .flat_map(|e| &e.features)
            .flat_map(|f| &f.tasks)
    }

    pub fn feature_count(&self) -> usize {
        self.epics.iter().map(|e| e.features.len()).sum()
    }
}
