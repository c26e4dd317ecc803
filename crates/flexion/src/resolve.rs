//! Tag processing: normalizing, vetting, and completing feature requests.
//!
//! Callers rarely supply a full label. The resolver takes whatever pairs
//! the request carries, merges them over the token's own morphology, and
//! completes them to a label of the scheme, filling gaps from category
//! defaults. Requests that name unknown or forbidden features are
//! rejected here, before any rule runs.

use std::sync::Arc;

use strsim::jaro_winkler;

use crate::error::{InflectError, InflectWarning};
use crate::schema::Schema;
use crate::types::{FeatureSet, Pos};

/// Categories that may only be requested when the token already carries
/// the same value. Asking a noun for a different gender or a pronoun for
/// a different type is a new word, not a form.
fn restricted(pos: Pos) -> &'static [&'static str] {
    match pos {
        Pos::Adv => &["Prontype"],
        Pos::Det => &["Definite", "Poss", "Prontype"],
        Pos::Noun => &["Gender"],
        Pos::Pron => &["Poss", "Prontype"],
        Pos::Propn => &["Gender"],
        Pos::Sconj => &["Prontype"],
        Pos::X => &["Foreign"],
        _ => &[],
    }
}

/// Normalizes and completes feature requests against a schema.
#[derive(Debug, Clone)]
pub struct TagResolver {
    schema: Arc<Schema>,
}

impl TagResolver {
    pub fn new(schema: Arc<Schema>) -> Self {
        TagResolver { schema }
    }

    /// Normalize spellings and reject pairs the schema does not know.
    pub fn check(&self, features: &FeatureSet) -> Result<FeatureSet, InflectError> {
        let normalized = features.normalized();
        for (category, value) in normalized.iter() {
            if !self.schema.has_category(category) {
                return Err(InflectError::UnknownCategory {
                    category: category.to_string(),
                    suggestions: suggest(category, self.schema.category_names()),
                });
            }
            if !self.schema.is_legal(category, value) {
                let legal = self.schema.values(category).unwrap_or(&[]);
                return Err(InflectError::UnknownValue {
                    category: category.to_string(),
                    value: value.to_string(),
                    suggestions: suggest(value, legal.iter().map(String::as_str)),
                });
            }
        }
        Ok(normalized)
    }

    /// Reject restricted categories unless the token already carries the
    /// requested value. Nouns asked for a declension class are exempt:
    /// adjectival declension is a legitimate request for any noun.
    pub fn filter(
        &self,
        pos: Pos,
        target: &FeatureSet,
        morph: &FeatureSet,
    ) -> Result<(), InflectError> {
        if pos == Pos::Noun && target.contains("Declination") {
            return Ok(());
        }
        for &category in restricted(pos) {
            if let Some(requested) = target.get(category) {
                if morph.get(category) != Some(requested) {
                    return Err(InflectError::IllegalCategory {
                        pos,
                        category: category.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Merge the target over the token's morphology and complete the
    /// result to a label of the scheme. Both inputs must already be
    /// normalized by [`TagResolver::check`].
    ///
    /// Completion picks the first of the shortest labels containing every
    /// merged pair, then fills the categories that label names but the
    /// merged set lacks with category defaults. Filled pairs are reported
    /// as a [`InflectWarning::DefaultedLabel`].
    pub fn resolve(
        &self,
        pos: Pos,
        token_norm: &str,
        morph: &FeatureSet,
        target: &FeatureSet,
        warnings: &mut Vec<InflectWarning>,
    ) -> Result<FeatureSet, InflectError> {
        let mut merged = morph.merge(target);
        if matches!(pos, Pos::Aux | Pos::Verb) {
            // A participle is not conjugated for mood or person; stale
            // pairs from the token's morphology would block resolution.
            // Number and tense stay only when the request pins them.
            if merged.get("Verbform") == Some("Part") {
                merged.remove("Mood");
                merged.remove("Person");
                for category in ["Number", "Tense"] {
                    if !target.contains(category) {
                        merged.remove(category);
                    }
                }
            }
            // Imperatives are tenseless and addressee-bound; the finite
            // person and tense of the token do not carry over.
            if merged.get("Mood") == Some("Imp") {
                for category in ["Person", "Tense"] {
                    if !target.contains(category) {
                        merged.remove(category);
                    }
                }
            }
            // Citation forms are tagged Verbform=Inf. A target that says
            // nothing about Verbform asks for a new form, not for the
            // infinitive to persist.
            if !target.contains("Verbform") && morph.get("Verbform") == Some("Inf") {
                merged.remove("Verbform");
            }
        }

        let winner = self
            .schema
            .labels(pos)
            .iter()
            .filter(|label| merged.subset_of(&label.features))
            .min_by_key(|label| label.features.len())
            .ok_or_else(|| InflectError::UnsupportedLabel {
                pos,
                label: merged.to_string(),
                suggestions: suggest_labels(&merged, self.schema.label_strings(pos)),
            })?;

        let mut resolved = FeatureSet::new();
        let mut added = FeatureSet::new();
        for category in winner.features.categories() {
            match merged.get(category) {
                Some(value) => resolved.insert(category, value),
                None => {
                    if let Some(default) = self.schema.default_value(category) {
                        resolved.insert(category, default);
                        added.insert(category, default);
                    }
                }
            }
        }
        if !added.is_empty() {
            warnings.push(InflectWarning::DefaultedLabel {
                token: token_norm.to_string(),
                added,
            });
        }
        Ok(resolved)
    }
}

/// Closest candidates to a misspelled input, best first, at most three.
pub(crate) fn suggest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let input = input.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| (jaro_winkler(&input, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(3);
    scored.into_iter().map(|(_, c)| c.to_string()).collect()
}

/// Label suggestions score better on shared pairs than on raw edit
/// distance, so compare against the rendered merged set.
fn suggest_labels<'a>(
    merged: &FeatureSet,
    labels: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    suggest(&merged.to_string(), labels)
}
