//! Preposition-article contractions such as `in + dem -> im`.
//!
//! Adpositions have no productive morphology, so the route is lexicon
//! only: a target either names a listed contraction in full or the
//! paradigm is closed for it.

use super::Paradigm;
use crate::error::InflectError;
use crate::types::FeatureSet;

#[derive(Debug, Clone)]
pub struct Adposition {
    paradigm: Paradigm,
}

impl Adposition {
    pub fn new(paradigm: Paradigm) -> Self {
        Adposition { paradigm }
    }

    /// A hit must consume the whole target; leftover features mean the
    /// request asked for a contraction the table does not carry.
    pub fn inflect(&self, lemma: &str, resolved: &FeatureSet) -> Result<String, InflectError> {
        match self.paradigm.search(lemma, resolved) {
            Some((form, remaining)) if remaining.is_empty() => Ok(form),
            _ => Err(InflectError::ClosedParadigm {
                lemma: lemma.to_string(),
                label: resolved.to_string(),
                reason: "no such contraction".to_string(),
            }),
        }
    }
}
