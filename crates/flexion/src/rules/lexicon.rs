//! Lexicon rule files: full or partial exceptional forms keyed by lemma.

use std::collections::BTreeMap;

use super::condition::RuleCondition;
use super::line::parse_line;
use super::SkippedRule;
use crate::schema::Schema;
use crate::types::FeatureSet;

/// One exceptional form with the features it consumes.
#[derive(Debug, Clone)]
pub struct LexiconRule {
    pub condition: RuleCondition,
    pub form: String,
}

/// All lexicon rules of one file, keyed by lemma, file order kept within
/// each lemma.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: BTreeMap<String, Vec<LexiconRule>>,
}

impl Lexicon {
    /// Compile a lexicon file. Uncompilable lines are skipped and
    /// reported, never fatal.
    pub fn parse(text: &str, schema: &Schema) -> (Lexicon, Vec<SkippedRule>) {
        let mut lexicon = Lexicon::default();
        let mut skipped = Vec::new();
        for (i, line) in text.lines().enumerate() {
            match parse_line(line, schema) {
                Ok(Some(raw)) => {
                    lexicon.entries.entry(raw.left).or_default().push(LexiconRule {
                        condition: raw.condition,
                        form: raw.right,
                    });
                }
                Ok(None) => {}
                Err(reason) => skipped.push(SkippedRule {
                    line: i + 1,
                    text: line.to_string(),
                    reason,
                }),
            }
        }
        (lexicon, skipped)
    }

    /// Look up the first rule for `lemma` whose condition admits every
    /// pair of the target. On a hit, returns the exceptional form and the
    /// target stripped of the categories the rule consumed.
    pub fn search(&self, lemma: &str, target: &FeatureSet) -> Option<(String, FeatureSet)> {
        self.entries
            .get(lemma)?
            .iter()
            .find(|rule| rule.condition.partial_match(target))
            .map(|rule| (rule.form.clone(), rule.condition.strip_covered(target)))
    }

    /// True if the file has at least one rule for `lemma`.
    pub fn contains(&self, lemma: &str) -> bool {
        self.entries.contains_key(lemma)
    }

    /// Lemmas carrying at least one rule, in sorted order.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of rules across all lemmas.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
