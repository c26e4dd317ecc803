//! Per-category inflectors over compiled rule tables.
//!
//! Each part of speech gets a thin inflector that wires its rule tables
//! into the realization pipeline: exceptional forms from the lexicon
//! first, then ending rewrites from the automaton, then any
//! category-specific steps such as umlaut markers or prefix rejoining.
//!
//! All inflectors work on lowercased text: callers pass the lowercased
//! token (`norm`) and lowercased lemma, and get a lowercase form back.

mod adjective;
mod adposition;
mod determiner;
mod noun;
mod pronoun;
mod proper;
mod verb;

pub use adjective::Adjective;
pub use adposition::Adposition;
pub use determiner::Determiner;
pub use noun::Noun;
pub use pronoun::Pronoun;
pub use proper::Proper;
pub use verb::{Auxiliary, PrefixInventory, Verb};

use std::sync::Arc;

use crate::error::InflectError;
use crate::rules::{Automaton, Lexicon};
use crate::types::FeatureSet;

/// The rule tables of one route. Either table may be absent; a missing
/// lexicon means no exceptional forms, a missing automaton means no
/// ending rewrites.
#[derive(Debug, Clone, Default)]
pub struct Paradigm {
    lexicon: Option<Arc<Lexicon>>,
    automaton: Option<Arc<Automaton>>,
}

impl Paradigm {
    pub fn new(lexicon: Option<Arc<Lexicon>>, automaton: Option<Arc<Automaton>>) -> Self {
        Paradigm { lexicon, automaton }
    }

    /// Exceptional-form lookup. On a hit, the returned feature set is the
    /// target stripped of the categories the entry consumed.
    pub(crate) fn search(&self, lemma: &str, target: &FeatureSet) -> Option<(String, FeatureSet)> {
        self.lexicon.as_ref()?.search(lemma, target)
    }

    /// Run the remaining features through the automaton.
    pub(crate) fn rewrite(&self, stem: &str, remaining: &FeatureSet) -> String {
        match &self.automaton {
            Some(automaton) => automaton.apply(stem, remaining),
            None => stem.to_string(),
        }
    }

    /// The full pipeline: lexicon, then automaton on whatever features
    /// the lexicon left unconsumed.
    pub(crate) fn realize(&self, lemma: &str, target: &FeatureSet) -> String {
        match self.search(lemma, target) {
            Some((form, remaining)) => self.rewrite(&form, &remaining),
            None => self.rewrite(lemma, target),
        }
    }
}

/// A routed inflector, one per part of speech the router covers.
#[derive(Debug, Clone)]
pub(crate) enum PosInflector {
    /// Parts of speech that never change shape; returns the token as-is.
    Uninflected,
    Adjective(Arc<Adjective>),
    Adposition(Adposition),
    Determiner(Determiner),
    Noun(Noun),
    Pronoun(Pronoun),
    Proper(Proper),
    Auxiliary(Auxiliary),
    Verb(Verb),
}

impl PosInflector {
    pub(crate) fn inflect(
        &self,
        norm: &str,
        lemma: &str,
        resolved: &FeatureSet,
    ) -> Result<String, InflectError> {
        match self {
            PosInflector::Uninflected => Ok(norm.to_string()),
            PosInflector::Adjective(adjective) => Ok(adjective.inflect(norm, lemma, resolved)),
            PosInflector::Adposition(adposition) => adposition.inflect(lemma, resolved),
            PosInflector::Determiner(determiner) => determiner.inflect(norm, lemma, resolved),
            PosInflector::Noun(noun) => noun.inflect(norm, lemma, resolved),
            PosInflector::Pronoun(pronoun) => Ok(pronoun.inflect(lemma, resolved)),
            PosInflector::Proper(proper) => Ok(proper.inflect(lemma, resolved)),
            PosInflector::Auxiliary(auxiliary) => auxiliary.inflect(lemma, resolved),
            PosInflector::Verb(verb) => verb.inflect(lemma, resolved),
        }
    }
}
