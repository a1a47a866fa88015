//! Coherence checking over resolved design drafts.
//!
//! Evaluates the commutative diagrams from the aesthetic olog plus the
//! active archetype's forbidden combinations as independent predicates.
//! Violations are advisory: the checker reports, it never corrects or
//! rejects, and the assembler ships the draft either way.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Archetype, DesignCatalog, TaxonomyCategory};

/// The six resolved values under check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDraft {
    pub emotional_tone: String,
    pub head_shape: String,
    pub body_proportion: String,
    pub facial_style: String,
    pub color_triad: String,
    pub size_category: String,
}

impl DesignDraft {
    /// Resolved value for one category.
    pub fn get(&self, category: TaxonomyCategory) -> &str {
        match category {
            TaxonomyCategory::HeadShape => &self.head_shape,
            TaxonomyCategory::BodyProportion => &self.body_proportion,
            TaxonomyCategory::FacialStyle => &self.facial_style,
            TaxonomyCategory::ColorTriad => &self.color_triad,
            TaxonomyCategory::SizeCategory => &self.size_category,
            TaxonomyCategory::EmotionalTone => &self.emotional_tone,
        }
    }
}

/// One reported violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceViolation {
    /// Name of the constraint that fired.
    pub constraint: String,
    /// The declared human-readable explanation.
    pub detail: String,
}

/// Outcome of a coherence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceReport {
    pub valid: bool,
    pub violations: Vec<CoherenceViolation>,
}

/// Advisory constraint checker over the frozen catalog.
pub struct CoherenceChecker {
    catalog: Arc<DesignCatalog>,
}

impl CoherenceChecker {
    pub fn new(catalog: Arc<DesignCatalog>) -> Self {
        Self { catalog }
    }

    /// Check a resolved draft. Reports every violated constraint; never
    /// fails and never mutates the draft.
    pub fn check(&self, draft: &DesignDraft, archetype: Archetype) -> CoherenceReport {
        let mut violations = Vec::new();

        for constraint in &self.catalog.constraints {
            let fired = constraint.forbidden.iter().all(|set| {
                set.values
                    .iter()
                    .any(|value| value == draft.get(set.category))
            });
            if fired {
                violations.push(CoherenceViolation {
                    constraint: constraint.name.clone(),
                    detail: constraint.explanation.clone(),
                });
            }
        }

        let rule = self.catalog.archetypes.rule(archetype);
        for (index, combo) in rule.forbidden_combinations.iter().enumerate() {
            let fired = combo
                .iter()
                .all(|(category, value)| draft.get(*category) == value);
            if fired {
                let pairs = combo
                    .iter()
                    .map(|(category, value)| format!("{}={}", category, value))
                    .collect::<Vec<_>>()
                    .join(", ");
                violations.push(CoherenceViolation {
                    constraint: format!("{}_forbidden_{}", archetype, index + 1),
                    detail: format!("{} never pairs with {}", archetype, pairs),
                });
            }
        }

        CoherenceReport {
            valid: violations.is_empty(),
            violations,
        }
    }
}
