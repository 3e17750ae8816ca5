//! story-mapper - turn product descriptions into story maps
//!
//! This library builds epic, feature and task story maps from a free-text
//! product description. Live providers (DeepSeek, Gemini) are tried first and
//! deterministic templates fill in whenever a provider is unavailable.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine
#![allow(clippy::too_many_arguments)] // Some functions legitimately need many params

pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod converter;
pub mod export;
pub mod llm_providers;
pub mod logger;
pub mod mock;
pub mod orchestrator;
pub mod prompt;
pub mod providers;
pub mod response;
pub mod types;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use config::Config;
pub use converter::to_internal_tree;
pub use llm_providers::{ClientError, StoryMapClient};
pub use mock::MockGenerator;
pub use orchestrator::{ProviderStatus, StoryMapService};
pub use providers::{Provider, ProviderConfig};

pub use types::{GeneratedStoryMap, StoryMap};
