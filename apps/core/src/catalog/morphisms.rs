//! Intent morphisms: the ordered keyword-to-value rule tables.
//!
//! Each mapped category carries one table sourced from the aesthetic olog.
//! Rules are evaluated strictly in document order and the first match wins,
//! so table order is part of the configuration contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::taxonomy::TaxonomyCategory;
use crate::error::AppError;

/// A design-intent field a rule may scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentField {
    Mood,
    WeightFeeling,
    ColorFeeling,
    SizeImplication,
    PrimaryShape,
}

impl IntentField {
    pub fn key(&self) -> &'static str {
        match self {
            IntentField::Mood => "mood",
            IntentField::WeightFeeling => "weight_feeling",
            IntentField::ColorFeeling => "color_feeling",
            IntentField::SizeImplication => "size_implication",
            IntentField::PrimaryShape => "primary_shape",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mood" => Some(IntentField::Mood),
            "weight_feeling" => Some(IntentField::WeightFeeling),
            "color_feeling" => Some(IntentField::ColorFeeling),
            "size_implication" => Some(IntentField::SizeImplication),
            "primary_shape" => Some(IntentField::PrimaryShape),
            _ => None,
        }
    }
}

/// One ordered rule: if `field` contains `keyword`, pick `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRule {
    pub field: IntentField,
    /// Lowercase substring to look for.
    pub keyword: String,
    /// Target value, a validated member of the table's category.
    pub value: String,
}

/// The named rule table for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphismRules {
    /// Morphism name from the olog document, echoed into source metadata.
    pub name: String,
    pub rules: Vec<IntentRule>,
}

/// One rule table per mapped category. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct MorphismTable {
    tables: BTreeMap<TaxonomyCategory, MorphismRules>,
}

impl MorphismTable {
    /// Builds the table, rejecting missing categories.
    pub fn new(tables: BTreeMap<TaxonomyCategory, MorphismRules>) -> Result<Self, AppError> {
        for category in TaxonomyCategory::MAPPED {
            if !tables.contains_key(&category) {
                return Err(AppError::Config(format!(
                    "no morphism table targets '{}'",
                    category
                )));
            }
        }
        Ok(Self { tables })
    }

    /// Rule table for a mapped category. Complete by construction.
    pub fn rules_for(&self, category: TaxonomyCategory) -> &MorphismRules {
        &self.tables[&category]
    }

    /// Morphism names in deterministic (category) order, for metadata.
    pub fn morphism_names(&self) -> Vec<String> {
        self.tables.values().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_round_trip() {
        for field in [
            IntentField::Mood,
            IntentField::WeightFeeling,
            IntentField::ColorFeeling,
            IntentField::SizeImplication,
            IntentField::PrimaryShape,
        ] {
            assert_eq!(IntentField::from_key(field.key()), Some(field));
        }
        assert_eq!(IntentField::from_key("texture"), None);
    }

    #[test]
    fn test_table_requires_every_mapped_category() {
        let mut tables = BTreeMap::new();
        tables.insert(
            TaxonomyCategory::HeadShape,
            MorphismRules {
                name: "design_intent_to_head_shape".to_string(),
                rules: vec![],
            },
        );
        let err = MorphismTable::new(tables).unwrap_err();
        assert!(err.to_string().contains("morphism table"));
    }
}
