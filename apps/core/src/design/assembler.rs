//! Character Assembler - Main orchestrator for the design brain.
//!
//! Coordinates tone classification, category resolution, coherence checking,
//! name generation and rationale assembly into one `CharacterSpec`.
//!
//! Every step is a pure function of the request and the frozen catalog:
//! identical inputs produce bit-identical records.

use std::sync::Arc;
use tracing::debug;

use super::character::{humanize, CharacterSpec, DesignGuidelines, SourceMetadata};
use super::coherence::{CoherenceChecker, CoherenceReport, DesignDraft};
use super::intent::{DesignIntent, IntentMapper, Resolution, ResolutionSource};
use super::tone::{ToneClassifier, ToneResult};
use crate::catalog::{DesignCatalog, IntentField, TaxonomyCategory};

/// Fragment used when the prompt has no usable word.
const DEFAULT_NAME_FRAGMENT: &str = "Poco";

/// Main assembler that orchestrates all design components.
pub struct CharacterAssembler {
    catalog: Arc<DesignCatalog>,
    tone: ToneClassifier,
    mapper: IntentMapper,
    checker: CoherenceChecker,
}

impl CharacterAssembler {
    pub fn new(catalog: Arc<DesignCatalog>) -> Self {
        Self {
            tone: ToneClassifier::new(catalog.clone()),
            mapper: IntentMapper::new(catalog.clone()),
            checker: CoherenceChecker::new(catalog.clone()),
            catalog,
        }
    }

    /// Assemble a complete character specification. Total: every prompt,
    /// however unrecognized, resolves through defaults.
    pub fn assemble(&self, user_prompt: &str, intent: Option<&DesignIntent>) -> CharacterSpec {
        // 1. Classify tone over the prompt plus any mood text
        let mut tone_text = user_prompt.to_string();
        if let Some(mood) = intent.and_then(|i| i.field(IntentField::Mood)) {
            tone_text.push(' ');
            tone_text.push_str(mood);
        }
        let tone = self.tone.classify(&tone_text);
        let rule = self.catalog.archetypes.rule(tone.archetype);
        debug!(archetype = %tone.archetype, "tone classified");

        // 2. Resolve each taxonomy category
        let archetype = tone.archetype;
        let head = self
            .mapper
            .resolve(TaxonomyCategory::HeadShape, intent, archetype);
        let body = self
            .mapper
            .resolve(TaxonomyCategory::BodyProportion, intent, archetype);
        let facial = self
            .mapper
            .resolve(TaxonomyCategory::FacialStyle, intent, archetype);
        let color = self
            .mapper
            .resolve(TaxonomyCategory::ColorTriad, intent, archetype);
        let size = self
            .mapper
            .resolve(TaxonomyCategory::SizeCategory, intent, archetype);

        let draft = DesignDraft {
            emotional_tone: archetype.identifier().to_string(),
            head_shape: head.value.clone(),
            body_proportion: body.value.clone(),
            facial_style: facial.value.clone(),
            color_triad: color.value.clone(),
            size_category: size.value.clone(),
        };

        // 3. Check coherence (advisory only)
        let coherence = self.checker.check(&draft, archetype);

        // 4. Generate the character name
        let character_name = format!("{}{}", rule.name_prefix, name_fragment(user_prompt));

        // 5. Assemble the rationale
        let resolutions = [&head, &body, &facial, &color, &size];
        let design_rationale = self.rationale(&tone, &resolutions, &coherence);

        // 6. Build guidelines and metadata
        let design_guidelines = self.guidelines(&draft);
        let source_metadata = SourceMetadata {
            aesthetic_olog: self.catalog.sources.aesthetic_olog.clone(),
            intentionality_olog: self.catalog.sources.intentionality_olog.clone(),
            morphisms_applied: self.catalog.morphisms.morphism_names(),
            commutative_diagrams_checked: self
                .catalog
                .constraints
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            design_seed: design_seed(user_prompt),
        };

        CharacterSpec {
            character_name,
            user_prompt: user_prompt.to_string(),
            emotional_tone: archetype.identifier().to_string(),
            core_intention: rule.core_intention.clone(),
            composition_principle: rule.composition_principle.clone(),
            why_this_works: rule.why_this_works.clone(),
            head_shape: draft.head_shape,
            body_proportion: draft.body_proportion,
            facial_style: draft.facial_style,
            color_triad: draft.color_triad,
            size_category: draft.size_category,
            design_guidelines,
            design_rationale,
            coherence,
            source_metadata,
        }
    }

    fn rationale(
        &self,
        tone: &ToneResult,
        resolutions: &[&Resolution],
        coherence: &CoherenceReport,
    ) -> String {
        let mut parts = Vec::with_capacity(resolutions.len() + coherence.violations.len() + 1);

        match &tone.matched_keyword {
            Some(keyword) => parts.push(format!(
                "emotional_tone '{}' inferred from the keyword '{}'",
                tone.archetype, keyword
            )),
            None => parts.push(format!(
                "emotional_tone '{}' is the declared default (no archetype keyword matched)",
                tone.archetype
            )),
        }

        for resolution in resolutions {
            match &resolution.source {
                ResolutionSource::RuleMatch { field, keyword } => parts.push(format!(
                    "{} '{}' follows {} mentioning '{}'",
                    resolution.category,
                    resolution.value,
                    field.key(),
                    keyword
                )),
                ResolutionSource::ArchetypeDefault => parts.push(format!(
                    "{} '{}' falls back to the {} default",
                    resolution.category, resolution.value, tone.archetype
                )),
            }
        }

        for violation in &coherence.violations {
            parts.push(format!(
                "coherence advisory [{}]: {}",
                violation.constraint, violation.detail
            ));
        }

        parts.join("; ")
    }

    fn guidelines(&self, draft: &DesignDraft) -> DesignGuidelines {
        let principles = &self.catalog.principles;
        DesignGuidelines {
            aesthetic: principles.aesthetic.clone(),
            head_description: format!("Use a {} shape for the head", humanize(&draft.head_shape)),
            body_description: format!("Body should be {}", humanize(&draft.body_proportion)),
            facial_description: format!("Face features: {}", humanize(&draft.facial_style)),
            size_note: format!("Character size: {}", humanize(&draft.size_category)),
            color_note: format!("Use a {} color palette", humanize(&draft.color_triad)),
            universal_principles: principles.universal.clone(),
        }
    }
}

/// First three alphanumeric characters of the prompt's first word,
/// capitalized; a fixed fragment covers empty prompts.
fn name_fragment(prompt: &str) -> String {
    let word = prompt
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .find(|w| !w.is_empty());

    match word {
        Some(w) => {
            let stem: String = w.chars().take(3).collect();
            let mut chars = stem.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => DEFAULT_NAME_FRAGMENT.to_string(),
            }
        }
        None => DEFAULT_NAME_FRAGMENT.to_string(),
    }
}

/// FNV-1a 64-bit over the prompt bytes, folded into the 0..100 seed range
/// the olog tooling expects. Stable across runs and platforms.
pub(crate) fn design_seed(prompt: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in prompt.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash % 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_catalog;

    #[test]
    fn test_name_fragment() {
        assert_eq!(name_fragment("pure happiness"), "Pur");
        assert_eq!(name_fragment("the feeling of procrastination"), "The");
        assert_eq!(name_fragment("!!! sparkle"), "Spa");
        assert_eq!(name_fragment("ab"), "Ab");
        assert_eq!(name_fragment(""), "Poco");
        assert_eq!(name_fragment("   "), "Poco");
        assert_eq!(name_fragment("!?!"), "Poco");
    }

    #[test]
    fn test_design_seed_is_stable_and_bounded() {
        let first = design_seed("the feeling of procrastination");
        assert!(first < 100);
        for _ in 0..5 {
            assert_eq!(design_seed("the feeling of procrastination"), first);
        }
        // Distinct prompts should not all collapse to one seed.
        assert_ne!(design_seed("a"), design_seed("b"));
    }

    #[test]
    fn test_assemble_uses_prefix_and_fragment() {
        let assembler = CharacterAssembler::new(test_catalog());

        let spec = assembler.assemble("pure happiness and celebration", None);
        assert_eq!(spec.character_name, "JoyPur");

        let spec = assembler.assemble("", None);
        assert_eq!(spec.character_name, "JoyPoco");
    }

    #[test]
    fn test_rationale_names_every_category() {
        let assembler = CharacterAssembler::new(test_catalog());
        let spec = assembler.assemble("a sleepy little cloud", None);

        for key in [
            "emotional_tone",
            "head_shape",
            "body_proportion",
            "facial_style",
            "color_triad",
            "size_category",
        ] {
            assert!(
                spec.design_rationale.contains(key),
                "rationale should mention {}: {}",
                key,
                spec.design_rationale
            );
        }
    }
}
