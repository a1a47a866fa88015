//! Catalog Tests
//!
//! Loading the bundled olog documents, and every way a malformed document
//! must fail fast at startup instead of surfacing mid-request.

use std::fs;

use serde_yaml::Value;
use tempfile::TempDir;

use super::{ologs_fixture_dir, test_catalog};
use crate::catalog::{
    Archetype, DesignCatalog, TaxonomyCategory, AESTHETIC_FILENAME, INTENTIONALITY_FILENAME,
};
use crate::error::AppError;

fn read_doc(filename: &str) -> Value {
    let text = fs::read_to_string(ologs_fixture_dir().join(filename)).unwrap();
    serde_yaml::from_str(&text).unwrap()
}

/// Loads the bundled documents with a patch applied to each, from a
/// temporary directory.
fn load_patched(
    patch_aesthetic: impl FnOnce(&mut Value),
    patch_intentionality: impl FnOnce(&mut Value),
) -> Result<DesignCatalog, AppError> {
    let dir = TempDir::new().unwrap();

    let mut aesthetic = read_doc(AESTHETIC_FILENAME);
    patch_aesthetic(&mut aesthetic);
    fs::write(
        dir.path().join(AESTHETIC_FILENAME),
        serde_yaml::to_string(&aesthetic).unwrap(),
    )
    .unwrap();

    let mut intentionality = read_doc(INTENTIONALITY_FILENAME);
    patch_intentionality(&mut intentionality);
    fs::write(
        dir.path().join(INTENTIONALITY_FILENAME),
        serde_yaml::to_string(&intentionality).unwrap(),
    )
    .unwrap();

    DesignCatalog::load(dir.path())
}

fn assert_config_err(result: Result<DesignCatalog, AppError>, needle: &str) {
    match result {
        Err(AppError::Config(message)) => assert!(
            message.contains(needle),
            "expected config error mentioning '{}', got: {}",
            needle,
            message
        ),
        Err(other) => panic!("expected Config error, got: {:?}", other),
        Ok(_) => panic!("expected load to fail ({})", needle),
    }
}

mod loading {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = test_catalog();

        assert_eq!(catalog.archetypes.priority().len(), 7);
        assert_eq!(catalog.archetypes.default_archetype(), Archetype::Joyful);
        assert_eq!(catalog.constraints.len(), 3);
        for category in TaxonomyCategory::ALL {
            assert!(
                !catalog.taxonomy.values(category).is_empty(),
                "{} must have values",
                category
            );
        }
    }

    #[test]
    fn test_every_archetype_default_is_a_taxonomy_member() {
        let catalog = test_catalog();

        for archetype in Archetype::ALL {
            let rule = catalog.archetypes.rule(archetype);
            for category in TaxonomyCategory::MAPPED {
                let value = rule.defaults.get(category).unwrap();
                assert!(
                    catalog.taxonomy.contains(category, value),
                    "{} default '{}' must be a {} value",
                    archetype,
                    value,
                    category
                );
            }
        }
    }

    #[test]
    fn test_archetype_keywords_are_lowercase_and_non_empty() {
        let catalog = test_catalog();

        for archetype in Archetype::ALL {
            let rule = catalog.archetypes.rule(archetype);
            assert!(!rule.design_intent_keywords.is_empty());
            for keyword in &rule.design_intent_keywords {
                assert_eq!(keyword, &keyword.to_lowercase());
                assert!(!keyword.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_lookup_covers_exactly_the_seven_identifiers() {
        let catalog = test_catalog();

        for archetype in Archetype::ALL {
            let rule = catalog.archetypes.lookup(archetype.identifier()).unwrap();
            assert_eq!(rule.archetype, archetype);
        }
        for bad in ["joyful", "unknown_character_archetype", ""] {
            let err = catalog.archetypes.lookup(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidArchetype(_)), "{:?}", err);
        }
    }
}

mod failure_modes {
    use super::*;

    #[test]
    fn test_missing_documents_fail() {
        let dir = TempDir::new().unwrap();
        let err = DesignCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "{:?}", err);
    }

    #[test]
    fn test_unparseable_yaml_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(AESTHETIC_FILENAME), "olog: [unclosed").unwrap();
        fs::write(
            dir.path().join(INTENTIONALITY_FILENAME),
            serde_yaml::to_string(&read_doc(INTENTIONALITY_FILENAME)).unwrap(),
        )
        .unwrap();

        let err = DesignCatalog::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("cannot parse"), "{}", err);
    }

    #[test]
    fn test_empty_value_set_rejected() {
        let result = load_patched(
            |doc| {
                doc["olog"]["types"]["SizeCategory"]["instances"] = Value::Sequence(vec![]);
            },
            |_| {},
        );
        assert_config_err(result, "empty value set");
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let result = load_patched(
            |doc| {
                let instances = doc["olog"]["types"]["SizeCategory"]["instances"]
                    .as_sequence_mut()
                    .unwrap();
                instances.push(Value::from("small_plush_toy"));
            },
            |_| {},
        );
        assert_config_err(result, "twice");
    }

    #[test]
    fn test_morphism_value_outside_taxonomy_rejected() {
        let result = load_patched(
            |doc| {
                doc["olog"]["morphisms"]["design_intent_to_head_shape"]["rules"][0]["value"] =
                    Value::from("square_head");
            },
            |_| {},
        );
        assert_config_err(result, "square_head");
    }

    #[test]
    fn test_morphism_unknown_field_rejected() {
        let result = load_patched(
            |doc| {
                doc["olog"]["morphisms"]["design_intent_to_head_shape"]["rules"][0]["field"] =
                    Value::from("texture_feeling");
            },
            |_| {},
        );
        assert_config_err(result, "texture_feeling");
    }

    #[test]
    fn test_diagram_value_outside_taxonomy_rejected() {
        let result = load_patched(
            |doc| {
                doc["olog"]["commutative_diagrams"]["proportional_coherence"]["forbidden"][0]
                    ["values"] = Value::Sequence(vec![Value::from("neon_green")]);
            },
            |_| {},
        );
        assert_config_err(result, "neon_green");
    }

    #[test]
    fn test_missing_archetype_default_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["instances"]["joyful_character_archetype"]["defaults"]
                    .as_mapping_mut()
                    .unwrap()
                    .remove("size_category");
            },
        );
        // Missing field fails while parsing the defaults record
        assert_config_err(result, "cannot parse");
    }

    #[test]
    fn test_archetype_default_outside_taxonomy_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["instances"]["joyful_character_archetype"]["defaults"]["head_shape"] =
                    Value::from("square_head");
            },
        );
        assert_config_err(result, "square_head");
    }

    #[test]
    fn test_keywordless_archetype_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["instances"]["sleepy_character_archetype"]
                    ["design_intent_keywords"] = Value::Sequence(vec![]);
            },
        );
        assert_config_err(result, "no design intent keywords");
    }

    #[test]
    fn test_short_priority_list_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                let priority = doc["olog"]["classifier"]["priority"]
                    .as_sequence_mut()
                    .unwrap();
                priority.truncate(3);
            },
        );
        assert_config_err(result, "priority");
    }

    #[test]
    fn test_unknown_priority_entry_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["classifier"]["priority"][0] =
                    Value::from("grumpy_character_archetype");
            },
        );
        assert_config_err(result, "grumpy_character_archetype");
    }

    #[test]
    fn test_unknown_classifier_default_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["classifier"]["default"] = Value::from("neutral");
            },
        );
        assert_config_err(result, "neutral");
    }

    #[test]
    fn test_missing_archetype_instance_rejected() {
        let result = load_patched(
            |_| {},
            |doc| {
                doc["olog"]["instances"]
                    .as_mapping_mut()
                    .unwrap()
                    .remove("dreamy_character_archetype");
            },
        );
        assert_config_err(result, "dreamy_character_archetype");
    }
}
