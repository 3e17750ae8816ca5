//! Story map types
//!
//! Two shapes live here:
//! - The generation shape produced by a provider or the template bank
//! - The addressable tree the rest of the application works with

mod generated;
mod story_map;

pub use generated::{
    DEFAULT_ACCEPTANCE_CRITERION, DEFAULT_EFFORT, GeneratedEpic, GeneratedFeature,
    GeneratedStoryMap, GeneratedTask, Priority,
};
pub use story_map::{Epic, Feature, StoryMap, Task, TaskStatus, TaskType};
