use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// An ordered set of morphological features (category to value).
///
/// Features always render in sorted category order as `Cat=Val` pairs joined
/// by `|`. That rendered string is the *label* used for schema lookups, so
/// two sets holding the same pairs always produce the same label.
///
/// # Example
///
/// ```
/// use flexion::FeatureSet;
///
/// let features: FeatureSet = "Number=Sing|Case=Nom".parse().unwrap();
/// assert_eq!(features.to_string(), "Case=Nom|Number=Sing");
/// assert_eq!(features.get("Case"), Some("Nom"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet(BTreeMap<String, String>);

impl FeatureSet {
    /// Create an empty feature set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Get the value for a category, if present.
    pub fn get(&self, category: &str) -> Option<&str> {
        self.0.get(category).map(String::as_str)
    }

    /// True if the category is present.
    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Set a category to a value, replacing any previous value.
    pub fn insert(&mut self, category: impl Into<String>, value: impl Into<String>) {
        self.0.insert(category.into(), value.into());
    }

    /// Remove a category, returning its value if it was present.
    pub fn remove(&mut self, category: &str) -> Option<String> {
        self.0.remove(category)
    }

    /// Merge `other` into a copy of this set. On conflicts `other` wins.
    pub fn merge(&self, other: &FeatureSet) -> FeatureSet {
        let mut merged = self.clone();
        for (category, value) in &other.0 {
            merged.0.insert(category.clone(), value.clone());
        }
        merged
    }

    /// A copy of this set extended with one extra pair.
    pub fn with(&self, category: impl Into<String>, value: impl Into<String>) -> FeatureSet {
        let mut out = self.clone();
        out.insert(category, value);
        out
    }

    /// Pairs in sorted category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no features are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A copy with every category and value in canonical form: trimmed,
    /// first grapheme uppercased, remainder lowercased (`pronType=prs`
    /// becomes `Prontype=Prs`). Idempotent.
    pub fn normalized(&self) -> FeatureSet {
        let mut out = FeatureSet::new();
        for (category, value) in &self.0 {
            out.insert(title_case(category), title_case(value));
        }
        out
    }

    /// True if every pair of this set appears in `other` with an equal value.
    pub fn subset_of(&self, other: &FeatureSet) -> bool {
        self.0
            .iter()
            .all(|(c, v)| other.get(c) == Some(v.as_str()))
    }
}

impl Display for FeatureSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        for (category, value) in &self.0 {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{category}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error returned when a feature string does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed feature pair '{pair}': expected Category=Value")]
pub struct ParseFeaturesError {
    pair: String,
}

impl FromStr for FeatureSet {
    type Err = ParseFeaturesError;

    /// Parse `Cat=Val|Cat=Val` notation. The empty string is the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = FeatureSet::new();
        if s.trim().is_empty() {
            return Ok(set);
        }
        for pair in s.split('|') {
            let Some((category, value)) = pair.split_once('=') else {
                return Err(ParseFeaturesError {
                    pair: pair.to_string(),
                });
            };
            let (category, value) = (category.trim(), value.trim());
            if category.is_empty() || value.is_empty() {
                return Err(ParseFeaturesError {
                    pair: pair.to_string(),
                });
            }
            set.insert(category, value);
        }
        Ok(set)
    }
}

/// Trim, uppercase the first grapheme, lowercase the rest.
pub(crate) fn title_case(s: &str) -> String {
    let s = s.trim();
    let mut graphemes = s.graphemes(true);
    match graphemes.next() {
        None => String::new(),
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(&graphemes.as_str().to_lowercase());
            out
        }
    }
}
