//! Deterministic story maps without a live provider
//!
//! The description is matched against keyword sets in a fixed order and the
//! first hit picks a hand-written template. Anything else gets the generic
//! template, which echoes the description back.

mod templates;

use crate::types::GeneratedStoryMap;

/// Template families, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    ECommerce,
    SocialNetwork,
    TaskManagement,
    Generic,
}

impl TemplateKind {
    const KEYWORDS: &'static [(TemplateKind, &'static [&'static str])] = &[
        (TemplateKind::ECommerce, &["ecommerce", "shop", "store"]),
        (TemplateKind::SocialNetwork, &["social", "network"]),
        (TemplateKind::TaskManagement, &["task", "todo"]),
    ];

    /// Pick the template for a product description
    pub fn for_description(product_description: &str) -> Self {
        let lower = product_description.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(Self::Generic, |(kind, _)| *kind)
    }
}

/// Keyword-selected template bank
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, product_description: &str) -> GeneratedStoryMap {
        match TemplateKind::for_description(product_description) {
            TemplateKind::ECommerce => templates::ecommerce(),
            TemplateKind::SocialNetwork => templates::social_network(),
            TemplateKind::TaskManagement => templates::task_management(),
            TemplateKind::Generic => templates::generic(product_description),
        }
    }
}
