//! Automaton rule files: ordered regular rewrite rules.

use regex::Regex;

use super::condition::RuleCondition;
use super::line::parse_line;
use super::SkippedRule;
use crate::schema::Schema;
use crate::types::FeatureSet;

/// One rewrite rule: a pattern, the features that gate it, and a
/// replacement with `${n}` capture references.
#[derive(Debug)]
pub struct AutomatonRule {
    pattern: Regex,
    condition: RuleCondition,
    replacement: String,
}

/// All rewrite rules of one file, in file order.
#[derive(Debug, Default)]
pub struct Automaton {
    rules: Vec<AutomatonRule>,
}

impl Automaton {
    /// Compile an automaton file. Uncompilable lines are skipped and
    /// reported, never fatal.
    pub fn parse(text: &str, schema: &Schema) -> (Automaton, Vec<SkippedRule>) {
        let mut automaton = Automaton::default();
        let mut skipped = Vec::new();
        for (i, line) in text.lines().enumerate() {
            match parse_line(line, schema) {
                Ok(Some(raw)) => match Regex::new(&raw.left) {
                    Ok(pattern) => automaton.rules.push(AutomatonRule {
                        pattern,
                        condition: raw.condition,
                        replacement: raw.right,
                    }),
                    Err(e) => skipped.push(SkippedRule {
                        line: i + 1,
                        text: line.to_string(),
                        reason: format!("bad pattern: {e}"),
                    }),
                },
                Ok(None) => {}
                Err(reason) => skipped.push(SkippedRule {
                    line: i + 1,
                    text: line.to_string(),
                    reason,
                }),
            }
        }
        (automaton, skipped)
    }

    /// Fold the stem through every rule in file order. A rule fires when
    /// each category it covers is present in `remaining` with an admitted
    /// value; firing rewrites all pattern occurrences. Later rules see the
    /// output of earlier ones. No rule firing leaves the stem unchanged.
    pub fn apply(&self, stem: &str, remaining: &FeatureSet) -> String {
        let mut form = stem.to_string();
        for rule in &self.rules {
            if rule.condition.full_match(remaining) {
                form = rule
                    .pattern
                    .replace_all(&form, rule.replacement.as_str())
                    .into_owned();
            }
        }
        form
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
