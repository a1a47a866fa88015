//! Olog document loading and validation.
//!
//! Reads the two YAML documents, checks every cross-reference (rule values,
//! defaults, constraint members), and freezes the result into a
//! `DesignCatalog`. Both documents are fully validated before any request is
//! served; a malformed document fails startup, never a request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::info;

use super::archetypes::{Archetype, ArchetypeRule, ArchetypeTable, CategoryDefaults};
use super::morphisms::{IntentField, IntentRule, MorphismRules, MorphismTable};
use super::taxonomy::{CategoryValues, Taxonomy, TaxonomyCategory};
use crate::error::AppError;

/// File name of the aesthetic olog (taxonomy, morphisms, diagrams).
pub const AESTHETIC_FILENAME: &str = "aesthetic.olog.yaml";
/// File name of the intentionality olog (archetypes, classifier order).
pub const INTENTIONALITY_FILENAME: &str = "intentionality.olog.yaml";

/// A set of values within one category, as referenced by a constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSet {
    pub category: TaxonomyCategory,
    pub values: Vec<String>,
}

/// A named forbidden combination from the commutative diagrams: violated
/// when, for every entry, the draft's value is in the entry's set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceConstraint {
    pub name: String,
    pub explanation: String,
    pub forbidden: Vec<ValueSet>,
}

/// Aesthetic doctrine echoed into every generated specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPrinciples {
    pub aesthetic: String,
    pub universal: Vec<String>,
}

/// Names of the documents a catalog was built from, for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSources {
    pub aesthetic_olog: String,
    pub intentionality_olog: String,
}

/// The frozen configuration: taxonomy, archetypes, morphisms, constraints.
/// Built once at startup, shared by reference, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DesignCatalog {
    pub taxonomy: Taxonomy,
    pub archetypes: ArchetypeTable,
    pub morphisms: MorphismTable,
    pub constraints: Vec<CoherenceConstraint>,
    pub principles: DesignPrinciples,
    pub sources: DocumentSources,
}

impl DesignCatalog {
    /// Loads and validates both olog documents from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let aesthetic_path = dir.join(AESTHETIC_FILENAME);
        let aesthetic: AestheticDoc = read_doc(&aesthetic_path)?;
        let taxonomy = build_taxonomy(&aesthetic.olog)?;
        let morphisms = build_morphisms(&aesthetic.olog, &taxonomy)?;
        let constraints = build_constraints(&aesthetic.olog, &taxonomy)?;
        let principles = DesignPrinciples {
            aesthetic: aesthetic.olog.principles.aesthetic.clone(),
            universal: aesthetic.olog.principles.universal.clone(),
        };
        info!("✓ Loaded aesthetic olog from {}", aesthetic_path.display());

        let intentionality_path = dir.join(INTENTIONALITY_FILENAME);
        let intentionality: IntentionalityDoc = read_doc(&intentionality_path)?;
        let archetypes = build_archetypes(&intentionality.olog, &taxonomy)?;
        info!(
            "✓ Loaded intentionality olog from {}",
            intentionality_path.display()
        );

        Ok(Self {
            taxonomy,
            archetypes,
            morphisms,
            constraints,
            principles,
            sources: DocumentSources {
                aesthetic_olog: AESTHETIC_FILENAME.to_string(),
                intentionality_olog: INTENTIONALITY_FILENAME.to_string(),
            },
        })
    }
}

fn read_doc<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    serde_yaml::from_str(&text)
        .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
}

fn build_taxonomy(olog: &AestheticOlog) -> Result<Taxonomy, AppError> {
    let mut categories = BTreeMap::new();

    for (type_name, raw) in &olog.types {
        let category = TaxonomyCategory::from_type_name(type_name).ok_or_else(|| {
            AppError::Config(format!("unknown taxonomy type '{}'", type_name))
        })?;
        if raw.instances.is_empty() {
            return Err(AppError::Config(format!(
                "taxonomy type '{}' has an empty value set",
                type_name
            )));
        }
        let mut seen = BTreeSet::new();
        for value in &raw.instances {
            if value.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "taxonomy type '{}' contains a blank value",
                    type_name
                )));
            }
            if !seen.insert(value.as_str()) {
                return Err(AppError::Config(format!(
                    "taxonomy type '{}' declares '{}' twice",
                    type_name, value
                )));
            }
        }
        categories.insert(
            category,
            CategoryValues {
                description: raw.description.clone(),
                instances: raw.instances.clone(),
            },
        );
    }

    for category in TaxonomyCategory::ALL {
        if !categories.contains_key(&category) {
            return Err(AppError::Config(format!(
                "taxonomy is missing type '{}'",
                category.type_name()
            )));
        }
    }

    Ok(Taxonomy::new(categories))
}

fn build_morphisms(
    olog: &AestheticOlog,
    taxonomy: &Taxonomy,
) -> Result<MorphismTable, AppError> {
    let mut tables: BTreeMap<TaxonomyCategory, MorphismRules> = BTreeMap::new();

    for (name, raw) in &olog.morphisms {
        let category = TaxonomyCategory::from_type_name(&raw.target).ok_or_else(|| {
            AppError::Config(format!(
                "morphism '{}' targets unknown type '{}'",
                name, raw.target
            ))
        })?;
        if category == TaxonomyCategory::EmotionalTone {
            return Err(AppError::Config(format!(
                "morphism '{}' targets EmotionalTone, which is classified rather than mapped",
                name
            )));
        }
        if tables.contains_key(&category) {
            return Err(AppError::Config(format!(
                "two morphisms target '{}'",
                category
            )));
        }

        let mut rules = Vec::with_capacity(raw.rules.len());
        for rule in &raw.rules {
            let field = IntentField::from_key(&rule.field).ok_or_else(|| {
                AppError::Config(format!(
                    "morphism '{}' references unknown intent field '{}'",
                    name, rule.field
                ))
            })?;
            if rule.keyword.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "morphism '{}' contains a rule with an empty keyword",
                    name
                )));
            }
            if !taxonomy.contains(category, &rule.value) {
                return Err(AppError::Config(format!(
                    "morphism '{}' maps '{}' to '{}', which is not a {} value",
                    name, rule.keyword, rule.value, category
                )));
            }
            rules.push(IntentRule {
                field,
                keyword: rule.keyword.to_lowercase(),
                value: rule.value.clone(),
            });
        }

        tables.insert(
            category,
            MorphismRules {
                name: name.clone(),
                rules,
            },
        );
    }

    MorphismTable::new(tables)
}

fn build_constraints(
    olog: &AestheticOlog,
    taxonomy: &Taxonomy,
) -> Result<Vec<CoherenceConstraint>, AppError> {
    let mut constraints = Vec::new();

    for (name, raw) in &olog.commutative_diagrams {
        if raw.forbidden.is_empty() {
            return Err(AppError::Config(format!(
                "commutative diagram '{}' declares no forbidden sets",
                name
            )));
        }
        let mut forbidden = Vec::with_capacity(raw.forbidden.len());
        for set in &raw.forbidden {
            let category = TaxonomyCategory::from_key(&set.category).ok_or_else(|| {
                AppError::Config(format!(
                    "commutative diagram '{}' references unknown category '{}'",
                    name, set.category
                ))
            })?;
            if set.values.is_empty() {
                return Err(AppError::Config(format!(
                    "commutative diagram '{}' has an empty value set for '{}'",
                    name, category
                )));
            }
            for value in &set.values {
                if !taxonomy.contains(category, value) {
                    return Err(AppError::Config(format!(
                        "commutative diagram '{}' references '{}', which is not a {} value",
                        name, value, category
                    )));
                }
            }
            forbidden.push(ValueSet {
                category,
                values: set.values.clone(),
            });
        }
        constraints.push(CoherenceConstraint {
            name: name.clone(),
            explanation: raw.explanation.clone(),
            forbidden,
        });
    }

    Ok(constraints)
}

fn build_archetypes(
    olog: &IntentionalityOlog,
    taxonomy: &Taxonomy,
) -> Result<ArchetypeTable, AppError> {
    let mut rules = BTreeMap::new();

    for (identifier, raw) in &olog.instances {
        let archetype = Archetype::parse(identifier).map_err(|_| {
            AppError::Config(format!("unknown archetype instance '{}'", identifier))
        })?;

        if raw.name_prefix.trim().is_empty() {
            return Err(AppError::Config(format!(
                "archetype '{}' has an empty name_prefix",
                identifier
            )));
        }
        if raw.design_intent_keywords.is_empty() {
            return Err(AppError::Config(format!(
                "archetype '{}' declares no design intent keywords",
                identifier
            )));
        }
        let mut keywords = Vec::with_capacity(raw.design_intent_keywords.len());
        for keyword in &raw.design_intent_keywords {
            if keyword.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "archetype '{}' contains a blank keyword",
                    identifier
                )));
            }
            keywords.push(keyword.to_lowercase());
        }

        let defaults = CategoryDefaults {
            head_shape: raw.defaults.head_shape.clone(),
            body_proportion: raw.defaults.body_proportion.clone(),
            facial_style: raw.defaults.facial_style.clone(),
            color_triad: raw.defaults.color_triad.clone(),
            size_category: raw.defaults.size_category.clone(),
        };
        for category in TaxonomyCategory::MAPPED {
            // get() covers every mapped category by construction
            let value = defaults.get(category).unwrap_or_default();
            if !taxonomy.contains(category, value) {
                return Err(AppError::Config(format!(
                    "archetype '{}' default '{}' is not a {} value",
                    identifier, value, category
                )));
            }
        }

        let mut forbidden_combinations = Vec::with_capacity(raw.forbidden_combinations.len());
        for combo in &raw.forbidden_combinations {
            if combo.is_empty() {
                return Err(AppError::Config(format!(
                    "archetype '{}' declares an empty forbidden combination",
                    identifier
                )));
            }
            let mut typed = BTreeMap::new();
            for (key, value) in combo {
                let category = TaxonomyCategory::from_key(key).ok_or_else(|| {
                    AppError::Config(format!(
                        "archetype '{}' forbids unknown category '{}'",
                        identifier, key
                    ))
                })?;
                if !taxonomy.contains(category, value) {
                    return Err(AppError::Config(format!(
                        "archetype '{}' forbids '{}', which is not a {} value",
                        identifier, value, category
                    )));
                }
                typed.insert(category, value.clone());
            }
            forbidden_combinations.push(typed);
        }

        rules.insert(
            archetype,
            ArchetypeRule {
                archetype,
                name_prefix: raw.name_prefix.clone(),
                core_intention: raw.core_intention.clone(),
                composition_principle: raw.composition_principle.clone(),
                why_this_works: raw.why_this_works.clone(),
                design_intent_keywords: keywords,
                sensory_principles: raw.sensory_principles.clone(),
                proportion_rules: raw.proportion_rules.clone(),
                forbidden_combinations,
                defaults,
            },
        );
    }

    let mut priority = Vec::with_capacity(olog.classifier.priority.len());
    for identifier in &olog.classifier.priority {
        let archetype = Archetype::parse(identifier).map_err(|_| {
            AppError::Config(format!(
                "classifier priority lists unknown archetype '{}'",
                identifier
            ))
        })?;
        if priority.contains(&archetype) {
            return Err(AppError::Config(format!(
                "classifier priority lists '{}' twice",
                identifier
            )));
        }
        priority.push(archetype);
    }

    let default = Archetype::parse(&olog.classifier.default).map_err(|_| {
        AppError::Config(format!(
            "classifier default '{}' is not a known archetype",
            olog.classifier.default
        ))
    })?;

    ArchetypeTable::new(rules, priority, default)
}

// --- Raw document shapes, private to the loader ---

#[derive(Debug, Deserialize)]
struct AestheticDoc {
    olog: AestheticOlog,
}

#[derive(Debug, Deserialize)]
struct AestheticOlog {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    #[serde(default)]
    version: u32,
    types: BTreeMap<String, RawType>,
    morphisms: BTreeMap<String, RawMorphism>,
    commutative_diagrams: BTreeMap<String, RawDiagram>,
    principles: RawPrinciples,
}

#[derive(Debug, Deserialize)]
struct RawType {
    #[serde(default)]
    description: String,
    instances: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawMorphism {
    target: String,
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    field: String,
    keyword: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawDiagram {
    explanation: String,
    forbidden: Vec<RawValueSet>,
}

#[derive(Debug, Deserialize)]
struct RawValueSet {
    category: String,
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPrinciples {
    aesthetic: String,
    universal: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IntentionalityDoc {
    olog: IntentionalityOlog,
}

#[derive(Debug, Deserialize)]
struct IntentionalityOlog {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    #[serde(default)]
    version: u32,
    classifier: RawClassifier,
    instances: BTreeMap<String, RawArchetype>,
}

#[derive(Debug, Deserialize)]
struct RawClassifier {
    priority: Vec<String>,
    default: String,
}

#[derive(Debug, Deserialize)]
struct RawArchetype {
    name_prefix: String,
    #[serde(default)]
    core_intention: String,
    #[serde(default)]
    composition_principle: String,
    #[serde(default)]
    why_this_works: String,
    design_intent_keywords: Vec<String>,
    #[serde(default)]
    sensory_principles: Vec<String>,
    #[serde(default)]
    proportion_rules: BTreeMap<String, String>,
    #[serde(default)]
    forbidden_combinations: Vec<BTreeMap<String, String>>,
    defaults: RawDefaults,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    head_shape: String,
    body_proportion: String,
    facial_style: String,
    color_triad: String,
    size_category: String,
}
