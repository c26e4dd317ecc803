//! The public facade: pre-analyzed tokens in, inflected forms out.
//!
//! An [`Inflector`] is built once from a [`Tables`] bundle and reused.
//! Construction wires one inflector per routed part of speech; the
//! adjective inflector is shared with the noun, auxiliary, and verb
//! routes, which delegate attributive declension to it.

use std::collections::BTreeMap;
use std::sync::Arc;

use bon::Builder;

use crate::compound::{CompoundAnalyzer, TableSplitter};
use crate::error::{InflectError, InflectWarning, LoadError};
use crate::inflect::{
    Adjective, Adposition, Auxiliary, Determiner, Noun, PosInflector, Pronoun, Proper, Verb,
};
use crate::regex;
use crate::resolve::TagResolver;
use crate::schema::Schema;
use crate::tables::{InflectorKind, LoadReport, Tables};
use crate::types::{FeatureSet, Pos, Token};

/// One inflection order against a token sequence: which position to
/// inflect and toward what features.
///
/// ```
/// use flexion::{features, InflectRequest};
///
/// let request = InflectRequest::builder()
///     .index(1)
///     .target(features! { "Case" => "Dat", "Number" => "Plur" })
///     .build();
/// assert_eq!(request.index, 1);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct InflectRequest {
    /// Position in the token slice.
    pub index: usize,
    /// Requested feature pairs.
    pub target: FeatureSet,
}

/// The inflection engine for one language.
#[derive(Debug)]
pub struct Inflector {
    schema: Arc<Schema>,
    resolver: TagResolver,
    registry: BTreeMap<Pos, PosInflector>,
    report: LoadReport,
}

impl Inflector {
    // ===== construction =====

    /// Build an inflector from loaded tables. Unknown nouns fall back to
    /// compound splitting against the vocabulary of the noun lexicon.
    pub fn new(tables: Tables) -> Result<Inflector, LoadError> {
        let vocabulary = noun_vocabulary(&tables);
        Inflector::with_analyzer(tables, Arc::new(TableSplitter::new(vocabulary)))
    }

    /// Build an inflector with a caller-supplied compound analyzer.
    pub fn with_analyzer(
        tables: Tables,
        analyzer: Arc<dyn CompoundAnalyzer>,
    ) -> Result<Inflector, LoadError> {
        let schema = Arc::clone(tables.schema());
        let adjective = tables.route(Pos::Adj).and_then(|route| {
            (route.kind == InflectorKind::Adjective)
                .then(|| Arc::new(Adjective::new(Pos::Adj, tables.paradigm(route))))
        });
        let shared_adjective = |pos: Pos| {
            adjective
                .clone()
                .ok_or(LoadError::MissingAdjectiveRoute { pos })
        };

        let mut registry = BTreeMap::new();
        for (pos, route) in tables.routes() {
            let paradigm = tables.paradigm(route);
            let inflector = match route.kind {
                InflectorKind::Uninflected => PosInflector::Uninflected,
                InflectorKind::Adjective => match (&adjective, pos) {
                    (Some(shared), Pos::Adj) => PosInflector::Adjective(Arc::clone(shared)),
                    _ => PosInflector::Adjective(Arc::new(Adjective::new(pos, paradigm))),
                },
                InflectorKind::Adposition => PosInflector::Adposition(Adposition::new(paradigm)),
                InflectorKind::Determiner => PosInflector::Determiner(Determiner::new(paradigm)),
                InflectorKind::Noun => PosInflector::Noun(Noun::new(
                    paradigm,
                    shared_adjective(pos)?,
                    Arc::clone(&analyzer),
                )),
                InflectorKind::Pronoun => PosInflector::Pronoun(Pronoun::new(paradigm)),
                InflectorKind::Proper => PosInflector::Proper(Proper::new(paradigm)),
                InflectorKind::Auxiliary => {
                    PosInflector::Auxiliary(Auxiliary::new(paradigm, shared_adjective(pos)?))
                }
                InflectorKind::Verb => PosInflector::Verb(Verb::new(
                    paradigm,
                    shared_adjective(pos)?,
                    Arc::clone(tables.prefixes()),
                )),
            };
            registry.insert(pos, inflector);
        }

        Ok(Inflector {
            resolver: TagResolver::new(Arc::clone(&schema)),
            schema,
            registry,
            report: tables.report().clone(),
        })
    }

    /// The schema the tables were loaded against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rule lines the load skipped.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    // ===== inflection =====

    /// Inflect one token toward the target features.
    pub fn inflect(&self, token: &Token, target: &FeatureSet) -> Result<String, InflectError> {
        let mut warnings = Vec::new();
        self.inflect_token(token, target, &mut warnings)
    }

    /// Like [`Inflector::inflect`], also returning the warnings the
    /// pipeline emitted for this token.
    pub fn inflect_with_warnings(
        &self,
        token: &Token,
        target: &FeatureSet,
    ) -> Result<(String, Vec<InflectWarning>), InflectError> {
        let mut warnings = Vec::new();
        let form = self.inflect_token(token, target, &mut warnings)?;
        Ok((form, warnings))
    }

    /// Inflect the requested positions of a token sequence and re-join
    /// the surface text with single spaces. Untargeted tokens keep their
    /// surface text unchanged.
    pub fn inflect_text(
        &self,
        tokens: &[Token],
        requests: &[InflectRequest],
    ) -> Result<(String, Vec<InflectWarning>), InflectError> {
        if requests.is_empty() {
            return Err(InflectError::BadRequest {
                reason: "no inflection requests".to_string(),
            });
        }
        let mut targets: BTreeMap<usize, &FeatureSet> = BTreeMap::new();
        for request in requests {
            if request.index >= tokens.len() {
                return Err(InflectError::BadRequest {
                    reason: format!(
                        "index {} is out of range for {} tokens",
                        request.index,
                        tokens.len()
                    ),
                });
            }
            if targets.insert(request.index, &request.target).is_some() {
                return Err(InflectError::BadRequest {
                    reason: format!("token {} is targeted twice", request.index),
                });
            }
        }

        let mut warnings = Vec::new();
        let mut words = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            match targets.get(&index) {
                Some(target) => words.push(self.inflect_token(token, target, &mut warnings)?),
                None => words.push(token.text.clone()),
            }
        }
        Ok((words.join(" "), warnings))
    }

    fn inflect_token(
        &self,
        token: &Token,
        target: &FeatureSet,
        warnings: &mut Vec<InflectWarning>,
    ) -> Result<String, InflectError> {
        let norm = token.norm();
        if !is_german(&norm) {
            warnings.push(InflectWarning::NonGermanAlphabet {
                token: norm.clone(),
            });
            return Ok(norm);
        }
        if target.is_empty() {
            warnings.push(InflectWarning::EmptyTarget {
                token: norm.clone(),
            });
            return Ok(norm);
        }

        let target = self.resolver.check(target)?;
        let morph = self.resolver.check(&token.morph)?;
        self.resolver.filter(token.pos, &target, &morph)?;
        let resolved = self
            .resolver
            .resolve(token.pos, &norm, &morph, &target, warnings)?;

        let inflector = self
            .registry
            .get(&token.pos)
            .ok_or(InflectError::UnroutedPos { pos: token.pos })?;
        let lemma = token.lemma.to_lowercase();
        inflector.inflect(&norm, &lemma, &resolved)
    }
}

/// Seed vocabulary for compound splitting: every stem the noun lexicon
/// knows a form for.
fn noun_vocabulary(tables: &Tables) -> Vec<String> {
    tables
        .route(Pos::Noun)
        .and_then(|route| route.lexicon.as_deref())
        .and_then(|name| tables.lexicon(name))
        .map(|lexicon| lexicon.lemmas().map(str::to_string).collect())
        .unwrap_or_default()
}

fn is_german(norm: &str) -> bool {
    regex!("^[a-zäöüß]+$").is_match(norm)
}
