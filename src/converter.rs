//! Conversion from the generation shape to the addressable tree

use crate::types::{
    Epic, Feature, GeneratedEpic, GeneratedFeature, GeneratedStoryMap, GeneratedTask, StoryMap,
    Task, TaskStatus, TaskType,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Assign identifiers, ordering and timestamps to a generated story map
pub fn to_internal_tree(generated: &GeneratedStoryMap) -> StoryMap {
    let now = Utc::now();

    StoryMap {
        id: Uuid::new_v4(),
        title: generated.title.clone(),
        description: generated.description.clone(),
        epics: generated
            .epics
            .iter()
            .enumerate()
            .map(|(order, epic)| convert_epic(epic, order, now))
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

fn convert_epic(epic: &GeneratedEpic, order: usize, now: DateTime<Utc>) -> Epic {
    Epic {
        id: Uuid::new_v4(),
        title: epic.title.clone(),
        description: epic.description.clone(),
        order,
        features: epic
            .features
            .iter()
            .enumerate()
            .map(|(order, feature)| convert_feature(feature, order, now))
            .collect(),
    }
}

fn convert_feature(feature: &GeneratedFeature, order: usize, now: DateTime<Utc>) -> Feature {
    Feature {
        id: Uuid::new_v4(),
        title: feature.title.clone(),
        description: feature.description.clone(),
        order,
        tasks: feature
            .tasks
            .iter()
            .map(|task| convert_task(task, now))
            .collect(),
    }
}

fn convert_task(task: &GeneratedTask, now: DateTime<Utc>) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: task.title.clone(),
        description: task.description.clone(),
        kind: TaskType::Task,
        status: TaskStatus::Todo,
        priority: task.priority,
        estimated_effort: task.effort.clone(),
        acceptance_criteria: task.acceptance_criteria.clone(),
        created_at: now,
        updated_at: now,
    }
}
