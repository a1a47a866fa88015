//! # Catalog Module
//!
//! Read-once configuration for the design brain. Everything here is built
//! from the two YAML olog documents at startup and then frozen; request
//! handling only ever reads it.
//!
//! ## Components
//! - `taxonomy`: the closed design dimensions and their value sets
//! - `archetypes`: the seven emotional tones and their rule records
//! - `morphisms`: ordered keyword-to-value rule tables per category
//! - `loader`: YAML parsing plus full cross-reference validation

pub mod archetypes;
pub mod loader;
pub mod morphisms;
pub mod taxonomy;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use archetypes::{Archetype, ArchetypeRule, ArchetypeTable, CategoryDefaults};
#[allow(unused_imports)]
pub use loader::{
    CoherenceConstraint, DesignCatalog, DesignPrinciples, DocumentSources, ValueSet,
    AESTHETIC_FILENAME, INTENTIONALITY_FILENAME,
};
#[allow(unused_imports)]
pub use morphisms::{IntentField, IntentRule, MorphismRules, MorphismTable};
#[allow(unused_imports)]
pub use taxonomy::{CategoryValues, Taxonomy, TaxonomyCategory};
