//! Personal, reflexive and other closed-class pronouns.
//!
//! The personal paradigm is keyed under `ich` and the reflexive one
//! under `sich`, whatever surface lemma the tagger produced. Everything
//! else is looked up under its own lemma.

use super::Paradigm;
use crate::types::FeatureSet;

#[derive(Debug, Clone)]
pub struct Pronoun {
    paradigm: Paradigm,
}

impl Pronoun {
    pub fn new(paradigm: Paradigm) -> Self {
        Pronoun { paradigm }
    }

    pub fn inflect(&self, lemma: &str, resolved: &FeatureSet) -> String {
        let mut resolved = resolved.clone();
        let base = if resolved.get("Reflex") == Some("Yes") {
            // Reflexive entries never condition on pronoun type.
            resolved.remove("Prontype");
            "sich"
        } else if resolved.get("Prontype") == Some("Prs") {
            "ich"
        } else {
            lemma
        };
        self.paradigm.realize(base, &resolved)
    }
}
