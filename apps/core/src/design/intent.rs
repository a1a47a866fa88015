//! Design intent and the category mapper.
//!
//! A `DesignIntent` carries the caller's qualitative hints. The mapper
//! resolves each taxonomy category by scanning the category's ordered rule
//! table; the first rule whose intent field contains its keyword wins, and
//! everything else falls through to the active archetype's default. There is
//! no uncategorized sentinel: resolution is total by construction.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::catalog::{Archetype, DesignCatalog, IntentField, TaxonomyCategory};

/// Caller-supplied qualitative design hints. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct DesignIntent {
    #[validate(length(max = 500))]
    pub mood: Option<String>,
    #[validate(length(max = 500))]
    pub weight_feeling: Option<String>,
    #[validate(length(max = 500))]
    pub color_feeling: Option<String>,
    #[validate(length(max = 500))]
    pub size_implication: Option<String>,
    #[validate(length(max = 500))]
    pub primary_shape: Option<String>,
}

impl DesignIntent {
    /// Text of one intent field, if present.
    pub fn field(&self, field: IntentField) -> Option<&str> {
        match field {
            IntentField::Mood => self.mood.as_deref(),
            IntentField::WeightFeeling => self.weight_feeling.as_deref(),
            IntentField::ColorFeeling => self.color_feeling.as_deref(),
            IntentField::SizeImplication => self.size_implication.as_deref(),
            IntentField::PrimaryShape => self.primary_shape.as_deref(),
        }
    }
}

/// Where a resolved value came from, kept for the rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResolutionSource {
    /// A rule fired: `field` contained `keyword`.
    RuleMatch { field: IntentField, keyword: String },
    /// No rule fired (or no intent was given); the archetype default applied.
    ArchetypeDefault,
}

/// One resolved category value plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub category: TaxonomyCategory,
    pub value: String,
    pub source: ResolutionSource,
}

/// Deterministic category resolver over the morphism tables.
pub struct IntentMapper {
    catalog: Arc<DesignCatalog>,
}

impl IntentMapper {
    pub fn new(catalog: Arc<DesignCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve one category. Total: every input ends in a valid member of
    /// the category's closed value set.
    pub fn resolve(
        &self,
        category: TaxonomyCategory,
        intent: Option<&DesignIntent>,
        archetype: Archetype,
    ) -> Resolution {
        // Tone is classified, not mapped; its value is the archetype itself.
        if category == TaxonomyCategory::EmotionalTone {
            return Resolution {
                category,
                value: archetype.identifier().to_string(),
                source: ResolutionSource::ArchetypeDefault,
            };
        }

        if let Some(intent) = intent {
            let table = self.catalog.morphisms.rules_for(category);
            for rule in &table.rules {
                if let Some(text) = intent.field(rule.field) {
                    if text.to_lowercase().contains(rule.keyword.as_str()) {
                        return Resolution {
                            category,
                            value: rule.value.clone(),
                            source: ResolutionSource::RuleMatch {
                                field: rule.field,
                                keyword: rule.keyword.clone(),
                            },
                        };
                    }
                }
            }
        }

        let defaults = &self.catalog.archetypes.rule(archetype).defaults;
        Resolution {
            category,
            value: defaults
                .get(category)
                .unwrap_or(archetype.identifier())
                .to_string(),
            source: ResolutionSource::ArchetypeDefault,
        }
    }
}
