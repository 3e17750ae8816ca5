//! Export of a converted story map

use crate::types::{Priority, StoryMap};
use anyhow::{Context, Result};
use std::fmt::{self, Write};
use std::fs;
use std::path::Path;

const WRAP_WIDTH: usize = 78;

/// Pretty JSON using the tree's camelCase field names
pub fn to_json(story_map: &StoryMap) -> Result<String> {
    serde_json::to_string_pretty(story_map).context("Failed to serialize story map")
}

/// Write the JSON export to a file
pub fn write_json(story_map: &StoryMap, path: &Path) -> Result<()> {
    let json = to_json(story_map)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write story map to {}", path.display()))
}

/// Indented plain-text outline with numbered epics, features and tasks
pub fn render_outline(story_map: &StoryMap) -> String {
    let mut out = String::new();

    writeln!(out, "{}", story_map.title).expect("write to string should not fail");
    if !story_map.description.is_empty() {
        push_wrapped(&mut out, &story_map.description, "");
    }

    for (e, epic) in story_map.epics.iter().enumerate() {
        let epic_number = e + 1;
        writeln!(out, "\n{epic_number}. {}", epic.title).expect("write to string should not fail");
        if !epic.description.is_empty() {
            push_wrapped(&mut out, &epic.description, "   ");
        }

        for (f, feature) in epic.features.iter().enumerate() {
            let feature_number = format!("{epic_number}.{}", f + 1);
            writeln!(out, "   {feature_number} {}", feature.title)
                .expect("write to string should not fail");

            for (t, task) in feature.tasks.iter().enumerate() {
                writeln!(
                    out,
                    "      {feature_number}.{} {} [{}, {}]",
                    t + 1,
                    task.title,
                    task.priority,
                    task.estimated_effort
                )
                .expect("write to string should not fail");
                if !task.description.is_empty() {
                    push_wrapped(&mut out, &task.description, "         ");
                }
                for criterion in &task.acceptance_criteria {
                    writeln!(out, "         - {criterion}").expect("write to string should not fail");
                }
            }
        }
    }

    out
}

fn push_wrapped(out: &mut String, text: &str, indent: &str) {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    for line in textwrap::wrap(text, options) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Counts shown after generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoryMapSummary {
    pub epics: usize,
    pub features: usize,
    pub tasks: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl From<&StoryMap> for StoryMapSummary {
    fn from(story_map: &StoryMap) -> Self {
        let mut summary = Self {
            epics: story_map.epics.len(),
            features: story_map.feature_count(),
            ..Self::default()
        };

        for task in story_map.tasks() {
            summary.tasks += 1;
            match task.priority {
                Priority::High => summary.high += 1,
                Priority::Medium => summary.medium += 1,
                Priority::Low => summary.low += 1,
            }
        }

        summary
    }
}

impl fmt::Display for StoryMapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} epics, {} features, {} tasks ({} high, {} medium, {} low)",
            self.epics, self.features, self.tasks, self.high, self.medium, self.low
        )
    }
}
