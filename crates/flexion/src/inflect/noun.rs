//! Nouns: plural and case endings, nominalized adjectives, and a
//! compound fallback for lemmas the tables have never seen.

use std::sync::Arc;

use super::adjective::{has_weak_ending, strip_weak_ending, Adjective};
use super::Paradigm;
use crate::compound::CompoundAnalyzer;
use crate::error::InflectError;
use crate::types::FeatureSet;

#[derive(Debug, Clone)]
pub struct Noun {
    paradigm: Paradigm,
    adjective: Arc<Adjective>,
    analyzer: Arc<dyn CompoundAnalyzer>,
}

impl Noun {
    pub fn new(
        paradigm: Paradigm,
        adjective: Arc<Adjective>,
        analyzer: Arc<dyn CompoundAnalyzer>,
    ) -> Self {
        Noun {
            paradigm,
            adjective,
            analyzer,
        }
    }

    pub fn inflect(
        &self,
        norm: &str,
        lemma: &str,
        resolved: &FeatureSet,
    ) -> Result<String, InflectError> {
        if resolved.contains("Declination") {
            return self.nominalized(norm, lemma, resolved);
        }
        if let Some((form, remaining)) = self.paradigm.search(lemma, resolved) {
            return Ok(self.paradigm.rewrite(&form, &remaining));
        }
        // Unknown lemma: inflect the head of a recognized compound and
        // carry the modifier through unchanged.
        if let Some(split) = self.analyzer.split(lemma) {
            let head = self.paradigm.realize(&split.head, resolved);
            return Ok(format!("{}{head}", split.modifier));
        }
        Ok(self.paradigm.rewrite(lemma, resolved))
    }

    /// Nominalized adjectives (der Beamte, ein Beamter) decline like the
    /// adjective they come from. Requested by putting Declination in the
    /// target.
    fn nominalized(
        &self,
        norm: &str,
        lemma: &str,
        resolved: &FeatureSet,
    ) -> Result<String, InflectError> {
        if !has_weak_ending(norm) {
            return Err(InflectError::ClosedParadigm {
                lemma: lemma.to_string(),
                label: resolved.to_string(),
                reason: "not a nominalized adjective".to_string(),
            });
        }
        let stem = strip_weak_ending(lemma);
        Ok(self
            .adjective
            .inflect(norm, stem, &resolved.with("Degree", "Pos")))
    }
}
