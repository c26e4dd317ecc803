//! Rule conditions: which feature pairs a rule demands.
//!
//! A condition maps categories to admitted value sets. The two rule kinds
//! read it differently. Lexicon rules use [`RuleCondition::partial_match`]:
//! the *target* drives the test, and categories the condition never
//! mentions are free. Automaton rules use [`RuleCondition::full_match`]:
//! the *condition* drives the test, and every demanded category must
//! survive in the remaining set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::FeatureSet;

/// Feature demands attached to a single rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCondition(BTreeMap<String, BTreeSet<String>>);

impl RuleCondition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add admitted values for a category, merging with any present ones.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        values: impl IntoIterator<Item = String>,
    ) {
        self.0.entry(category.into()).or_default().extend(values);
    }

    /// True if the condition demands anything from this category.
    pub fn covers(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// True if the condition admits `value` for `category`. Categories the
    /// condition does not cover admit everything.
    pub fn admits(&self, category: &str, value: &str) -> bool {
        match self.0.get(category) {
            Some(values) => values.contains(value),
            None => true,
        }
    }

    /// Lexicon test: every pair of the target is admitted. The target may
    /// carry categories the condition never mentions.
    pub fn partial_match(&self, target: &FeatureSet) -> bool {
        target
            .iter()
            .all(|(category, value)| self.admits(category, value))
    }

    /// Automaton test: every covered category is present in `remaining`
    /// with an admitted value. An empty condition matches unconditionally.
    pub fn full_match(&self, remaining: &FeatureSet) -> bool {
        self.0.iter().all(|(category, values)| {
            remaining
                .get(category)
                .is_some_and(|value| values.contains(value))
        })
    }

    /// The target stripped of every category this condition covers. This
    /// is the remaining set a matched lexicon rule hands to the automaton
    /// stage.
    pub fn strip_covered(&self, target: &FeatureSet) -> FeatureSet {
        let mut remaining = target.clone();
        for category in self.0.keys() {
            remaining.remove(category);
        }
        remaining
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for RuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, values) in &self.0 {
            if !first {
                write!(f, "|")?;
            }
            first = false;
            if values.len() == 1 {
                // BTreeSet with one element; next() cannot miss.
                let only = values.iter().next().map_or("", String::as_str);
                write!(f, "{category}={only}")?;
            } else {
                let list: Vec<&str> = values.iter().map(String::as_str).collect();
                write!(f, "{category}=[{}]", list.join(","))?;
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Vec<String>)> for RuleCondition {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut condition = RuleCondition::new();
        for (category, values) in iter {
            condition.insert(category, values);
        }
        condition
    }
}
