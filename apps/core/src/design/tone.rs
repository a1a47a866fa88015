//! Emotional tone classification using archetype keywords.
//!
//! Pure substring matching against the configured trigger keywords, walked
//! in the declared priority order. No fuzzy matching, no scoring: the first
//! archetype with a keyword hit wins, and the declared default covers
//! everything else. Total over all inputs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Archetype, DesignCatalog};

/// Result of tone classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneResult {
    /// The winning archetype.
    pub archetype: Archetype,
    /// The keyword that fired, if any; `None` means the default applied.
    pub matched_keyword: Option<String>,
}

/// Keyword classifier over the archetype table.
pub struct ToneClassifier {
    catalog: Arc<DesignCatalog>,
}

impl ToneClassifier {
    pub fn new(catalog: Arc<DesignCatalog>) -> Self {
        Self { catalog }
    }

    /// Classify free text into one of the seven tones. Never fails: an
    /// unmatched (or empty) text resolves to the declared default.
    pub fn classify(&self, text: &str) -> ToneResult {
        let text = text.to_lowercase();

        for &archetype in self.catalog.archetypes.priority() {
            let rule = self.catalog.archetypes.rule(archetype);
            if let Some(keyword) = rule
                .design_intent_keywords
                .iter()
                .find(|keyword| text.contains(keyword.as_str()))
            {
                return ToneResult {
                    archetype,
                    matched_keyword: Some(keyword.clone()),
                };
            }
        }

        ToneResult {
            archetype: self.catalog.archetypes.default_archetype(),
            matched_keyword: None,
        }
    }
}
