//! Feature schema: legal categories, values, defaults, and the per-POS
//! label scheme.
//!
//! The schema is static configuration. Category declaration order is
//! meaningful only for documentation; label declaration order *is*
//! semantic: label completion tie-breaks on the first of the shortest
//! candidates in declaration order, so labels are kept in a `Vec`.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{FeatureSet, ParseFeaturesError, Pos};

/// One feature category: its closed value set and gap-filling default.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    /// Canonical category name (`Case`, `Number`, ...).
    pub name: String,
    /// Legal values, in declaration order.
    pub values: Vec<String>,
    /// Default value for gap filling. Falls back to the first value.
    #[serde(default)]
    pub default: Option<String>,
}

impl CategoryDef {
    /// The value used when label completion fills this category.
    pub fn default_value(&self) -> &str {
        match &self.default {
            Some(default) => default,
            None => &self.values[0],
        }
    }
}

/// A legal label for some part-of-speech, kept both as its rendered string
/// and as parsed features for subset tests.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub text: String,
    pub features: FeatureSet,
}

#[derive(Debug, Deserialize)]
struct SchemaFile {
    categories: Vec<CategoryDef>,
    labels: BTreeMap<String, Vec<String>>,
}

/// Failure to load a schema: bad JSON or bad content.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("category '{name}' is declared twice")]
    DuplicateCategory { name: String },
    #[error("category '{name}' has no values")]
    EmptyCategory { name: String },
    #[error("default '{value}' is not a legal value of category '{name}'")]
    BadDefault { name: String, value: String },
    #[error("labels key '{pos}' is not a part-of-speech tag")]
    BadPos { pos: String },
    #[error("label '{label}' for {pos} does not parse: {reason}")]
    BadLabel {
        pos: Pos,
        label: String,
        reason: String,
    },
    #[error("label '{label}' for {pos} uses unknown pair {category}={value}")]
    IllegalLabelPair {
        pos: Pos,
        label: String,
        category: String,
        value: String,
    },
}

/// The loaded feature schema.
#[derive(Debug)]
pub struct Schema {
    categories: Vec<CategoryDef>,
    index: HashMap<String, usize>,
    labels: BTreeMap<Pos, Vec<Label>>,
}

impl Schema {
    /// Parse and validate a schema from its JSON text.
    pub fn from_json(text: &str) -> Result<Schema, SchemaError> {
        Schema::build(serde_json::from_str(text)?)
    }

    fn build(file: SchemaFile) -> Result<Schema, SchemaError> {
        let mut index = HashMap::new();
        for (i, category) in file.categories.iter().enumerate() {
            if category.values.is_empty() {
                return Err(SchemaError::EmptyCategory {
                    name: category.name.clone(),
                });
            }
            if let Some(default) = &category.default {
                if !category.values.contains(default) {
                    return Err(SchemaError::BadDefault {
                        name: category.name.clone(),
                        value: default.clone(),
                    });
                }
            }
            if index.insert(category.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
        }

        let mut schema = Schema {
            categories: file.categories,
            index,
            labels: BTreeMap::new(),
        };
        for (pos_text, labels) in file.labels {
            let pos: Pos = pos_text
                .parse()
                .map_err(|_| SchemaError::BadPos { pos: pos_text })?;
            let mut parsed = Vec::with_capacity(labels.len());
            for label in labels {
                let features: FeatureSet =
                    label.parse().map_err(|e: ParseFeaturesError| {
                        SchemaError::BadLabel {
                            pos,
                            label: label.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                for (category, value) in features.iter() {
                    if !schema.is_legal(category, value) {
                        return Err(SchemaError::IllegalLabelPair {
                            pos,
                            label: label.clone(),
                            category: category.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
                parsed.push(Label {
                    text: label,
                    features,
                });
            }
            schema.labels.insert(pos, parsed);
        }
        Ok(schema)
    }

    /// True if the category exists.
    pub fn has_category(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// The legal values of a category, if it exists.
    pub fn values(&self, category: &str) -> Option<&[String]> {
        self.category(category).map(|def| def.values.as_slice())
    }

    /// True if `value` is legal for `category`.
    pub fn is_legal(&self, category: &str, value: &str) -> bool {
        self.values(category)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// The gap-filling default for a category.
    pub fn default_value(&self, category: &str) -> Option<&str> {
        self.category(category).map(CategoryDef::default_value)
    }

    /// Category names in declaration order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|def| def.name.as_str())
    }

    /// Legal labels for a part-of-speech, in declaration order. Empty for
    /// parts of speech the scheme does not mention.
    pub fn label_strings(&self, pos: Pos) -> impl Iterator<Item = &str> {
        self.labels(pos).iter().map(|label| label.text.as_str())
    }

    pub(crate) fn labels(&self, pos: Pos) -> &[Label] {
        self.labels.get(&pos).map_or(&[], Vec::as_slice)
    }

    /// True if the rendered label is legal for `pos`.
    pub fn has_label(&self, pos: Pos, label: &str) -> bool {
        self.labels(pos).iter().any(|l| l.text == label)
    }

    fn category(&self, category: &str) -> Option<&CategoryDef> {
        self.index.get(category).map(|&i| &self.categories[i])
    }
}
