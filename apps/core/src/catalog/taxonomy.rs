//! Design taxonomy: the closed dimensions of the design space.
//!
//! Every value a generated character can carry belongs to one of these
//! categories, and every category's value set is fixed at load time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A design dimension with a closed set of valid values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyCategory {
    HeadShape,
    BodyProportion,
    FacialStyle,
    ColorTriad,
    SizeCategory,
    EmotionalTone,
}

impl TaxonomyCategory {
    /// Every category, in canonical order.
    pub const ALL: [TaxonomyCategory; 6] = [
        TaxonomyCategory::HeadShape,
        TaxonomyCategory::BodyProportion,
        TaxonomyCategory::FacialStyle,
        TaxonomyCategory::ColorTriad,
        TaxonomyCategory::SizeCategory,
        TaxonomyCategory::EmotionalTone,
    ];

    /// The five categories resolved by the intent mapper. EmotionalTone is
    /// classified from text, not mapped.
    pub const MAPPED: [TaxonomyCategory; 5] = [
        TaxonomyCategory::HeadShape,
        TaxonomyCategory::BodyProportion,
        TaxonomyCategory::FacialStyle,
        TaxonomyCategory::ColorTriad,
        TaxonomyCategory::SizeCategory,
    ];

    /// snake_case key, as used in output records and constraint documents.
    pub fn key(&self) -> &'static str {
        match self {
            TaxonomyCategory::HeadShape => "head_shape",
            TaxonomyCategory::BodyProportion => "body_proportion",
            TaxonomyCategory::FacialStyle => "facial_style",
            TaxonomyCategory::ColorTriad => "color_triad",
            TaxonomyCategory::SizeCategory => "size_category",
            TaxonomyCategory::EmotionalTone => "emotional_tone",
        }
    }

    /// CamelCase type name, as used in the olog `types` section.
    pub fn type_name(&self) -> &'static str {
        match self {
            TaxonomyCategory::HeadShape => "HeadShape",
            TaxonomyCategory::BodyProportion => "BodyProportion",
            TaxonomyCategory::FacialStyle => "FacialStyle",
            TaxonomyCategory::ColorTriad => "ColorTriad",
            TaxonomyCategory::SizeCategory => "SizeCategory",
            TaxonomyCategory::EmotionalTone => "EmotionalTone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.type_name() == name)
    }
}

impl fmt::Display for TaxonomyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The declared value set of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValues {
    /// Human description from the olog document.
    pub description: String,
    /// Ordered, closed set of valid value identifiers.
    pub instances: Vec<String>,
}

/// The full taxonomy: one value set per category. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: BTreeMap<TaxonomyCategory, CategoryValues>,
}

impl Taxonomy {
    /// Builds a taxonomy; the loader guarantees every category is present
    /// and non-empty before calling this.
    pub fn new(categories: BTreeMap<TaxonomyCategory, CategoryValues>) -> Self {
        Self { categories }
    }

    /// The ordered value set of a category.
    pub fn values(&self, category: TaxonomyCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(|c| c.instances.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `value` is a member of the category's closed set.
    pub fn contains(&self, category: TaxonomyCategory, value: &str) -> bool {
        self.values(category).iter().any(|v| v == value)
    }

    /// Total number of declared values across all categories.
    #[allow(dead_code)]
    pub fn value_count(&self) -> usize {
        self.categories.values().map(|c| c.instances.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for category in TaxonomyCategory::ALL {
            assert_eq!(TaxonomyCategory::from_key(category.key()), Some(category));
            assert_eq!(
                TaxonomyCategory::from_type_name(category.type_name()),
                Some(category)
            );
        }
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert_eq!(TaxonomyCategory::from_key("hat_shape"), None);
        assert_eq!(TaxonomyCategory::from_type_name("head_shape"), None);
    }

    #[test]
    fn test_contains() {
        let mut categories = BTreeMap::new();
        categories.insert(
            TaxonomyCategory::SizeCategory,
            CategoryValues {
                description: String::new(),
                instances: vec!["small_plush_toy".to_string()],
            },
        );
        let taxonomy = Taxonomy::new(categories);

        assert!(taxonomy.contains(TaxonomyCategory::SizeCategory, "small_plush_toy"));
        assert!(!taxonomy.contains(TaxonomyCategory::SizeCategory, "gigantic"));
        assert!(!taxonomy.contains(TaxonomyCategory::HeadShape, "small_plush_toy"));
    }
}
