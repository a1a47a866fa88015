//! Emotional archetypes: the seven fixed tones and their rule records.
//!
//! An archetype bundles the design reasoning for one emotion: trigger
//! keywords for classification, per-category defaults, and combinations the
//! tone should never wear. The identifier set is closed; `Archetype::parse`
//! is the single place a caller-supplied identifier gets rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::taxonomy::TaxonomyCategory;
use crate::error::AppError;

/// One of the seven fixed emotional tones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Archetype {
    #[serde(rename = "joyful_character_archetype")]
    Joyful,
    #[serde(rename = "melancholic_character_archetype")]
    Melancholic,
    #[serde(rename = "anxious_character_archetype")]
    Anxious,
    #[serde(rename = "sleepy_character_archetype")]
    Sleepy,
    #[serde(rename = "mischievous_character_archetype")]
    Mischievous,
    #[serde(rename = "dreamy_character_archetype")]
    Dreamy,
    #[serde(rename = "determined_character_archetype")]
    Determined,
}

impl Archetype {
    /// Every archetype, in canonical order.
    pub const ALL: [Archetype; 7] = [
        Archetype::Joyful,
        Archetype::Melancholic,
        Archetype::Anxious,
        Archetype::Sleepy,
        Archetype::Mischievous,
        Archetype::Dreamy,
        Archetype::Determined,
    ];

    /// The wire identifier, as it appears in olog documents and output.
    pub fn identifier(&self) -> &'static str {
        match self {
            Archetype::Joyful => "joyful_character_archetype",
            Archetype::Melancholic => "melancholic_character_archetype",
            Archetype::Anxious => "anxious_character_archetype",
            Archetype::Sleepy => "sleepy_character_archetype",
            Archetype::Mischievous => "mischievous_character_archetype",
            Archetype::Dreamy => "dreamy_character_archetype",
            Archetype::Determined => "determined_character_archetype",
        }
    }

    /// Strict parse. Anything outside the seven identifiers is an
    /// `InvalidArchetype` error, never a silent substitution.
    pub fn parse(identifier: &str) -> Result<Self, AppError> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.identifier() == identifier)
            .ok_or_else(|| AppError::InvalidArchetype(identifier.to_string()))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Per-category default selections for one archetype. Every field is a
/// validated member of its category's value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefaults {
    pub head_shape: String,
    pub body_proportion: String,
    pub facial_style: String,
    pub color_triad: String,
    pub size_category: String,
}

impl CategoryDefaults {
    /// The default for a mapped category; `None` for EmotionalTone, which
    /// has no default other than the archetype itself.
    pub fn get(&self, category: TaxonomyCategory) -> Option<&str> {
        match category {
            TaxonomyCategory::HeadShape => Some(&self.head_shape),
            TaxonomyCategory::BodyProportion => Some(&self.body_proportion),
            TaxonomyCategory::FacialStyle => Some(&self.facial_style),
            TaxonomyCategory::ColorTriad => Some(&self.color_triad),
            TaxonomyCategory::SizeCategory => Some(&self.size_category),
            TaxonomyCategory::EmotionalTone => None,
        }
    }
}

/// The complete rule record for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRule {
    pub archetype: Archetype,
    /// Prefix for generated character names.
    pub name_prefix: String,
    pub core_intention: String,
    pub composition_principle: String,
    pub why_this_works: String,
    /// Trigger keywords for classification, lowercase, in declared order.
    pub design_intent_keywords: Vec<String>,
    pub sensory_principles: Vec<String>,
    pub proportion_rules: BTreeMap<String, String>,
    /// Value combinations this tone should never wear. Each entry maps
    /// categories to the offending value; a combination fires when every
    /// entry matches the resolved draft.
    pub forbidden_combinations: Vec<BTreeMap<TaxonomyCategory, String>>,
    pub defaults: CategoryDefaults,
}

/// All seven archetype rules plus the classifier ordering, frozen at load.
#[derive(Debug, Clone)]
pub struct ArchetypeTable {
    rules: BTreeMap<Archetype, ArchetypeRule>,
    priority: Vec<Archetype>,
    default: Archetype,
}

impl ArchetypeTable {
    /// Builds the table, rejecting incomplete rule sets or priority lists.
    pub fn new(
        rules: BTreeMap<Archetype, ArchetypeRule>,
        priority: Vec<Archetype>,
        default: Archetype,
    ) -> Result<Self, AppError> {
        for archetype in Archetype::ALL {
            if !rules.contains_key(&archetype) {
                return Err(AppError::Config(format!(
                    "archetype table is missing '{}'",
                    archetype
                )));
            }
        }
        if priority.len() != Archetype::ALL.len() {
            return Err(AppError::Config(format!(
                "classifier priority must list all {} archetypes, found {}",
                Archetype::ALL.len(),
                priority.len()
            )));
        }
        for archetype in Archetype::ALL {
            if !priority.contains(&archetype) {
                return Err(AppError::Config(format!(
                    "classifier priority is missing '{}'",
                    archetype
                )));
            }
        }
        Ok(Self {
            rules,
            priority,
            default,
        })
    }

    /// Rule record for an archetype. The constructor rejects incomplete
    /// tables, so every archetype resolves.
    pub fn rule(&self, archetype: Archetype) -> &ArchetypeRule {
        &self.rules[&archetype]
    }

    /// Rule record for a caller-supplied identifier; the strict lookup
    /// behind `get_archetype_rules`.
    pub fn lookup(&self, identifier: &str) -> Result<&ArchetypeRule, AppError> {
        Ok(self.rule(Archetype::parse(identifier)?))
    }

    /// Fixed classification order.
    pub fn priority(&self) -> &[Archetype] {
        &self.priority
    }

    /// The declared fallback when no keyword matches.
    pub fn default_archetype(&self) -> Archetype {
        self.default
    }
}
