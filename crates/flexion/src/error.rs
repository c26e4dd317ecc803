//! Error and warning types for the inflection engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::SchemaError;
use crate::types::{FeatureSet, Pos};

/// Errors that occur while loading an inflection table bundle.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a schema, router, or rule file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is malformed or inconsistent.
    #[error("bad schema '{path}': {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// A JSON configuration file (router, prefixes) is malformed.
    #[error("bad JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A route names neither a lexicon nor an automaton file.
    #[error("route for {pos} has no rule files")]
    EmptyRoute { pos: Pos },

    /// Noun and verb inflection delegate adjectival declension to the ADJ
    /// route, so a bundle that routes them must route ADJ too.
    #[error("router must route ADJ before {pos}: {pos} delegates adjectival declension to it")]
    MissingAdjectiveRoute { pos: Pos },
}

/// An error that occurred while inflecting a single token.
#[derive(Debug, Error)]
pub enum InflectError {
    /// Requested feature category is not in the schema.
    #[error("unknown category '{category}'{}", closest(.suggestions))]
    UnknownCategory {
        category: String,
        suggestions: Vec<String>,
    },

    /// Requested value is not legal for its category.
    #[error("unknown value '{value}' for category '{category}'{}", closest(.suggestions))]
    UnknownValue {
        category: String,
        value: String,
        suggestions: Vec<String>,
    },

    /// The category may not be requested for this part of speech unless
    /// the token already carries the same value.
    #[error("category '{category}' cannot be requested for {pos}")]
    IllegalCategory { pos: Pos, category: String },

    /// The resolved feature set completes no label of the scheme.
    #[error("no {pos} label matches '{label}'{}", closest(.suggestions))]
    UnsupportedLabel {
        pos: Pos,
        label: String,
        suggestions: Vec<String>,
    },

    /// The lemma has no form for an otherwise well-formed label.
    #[error("'{lemma}' has no form for '{label}': {reason}")]
    ClosedParadigm {
        lemma: String,
        label: String,
        reason: String,
    },

    /// The router does not route this part of speech.
    #[error("no route for part of speech {pos}")]
    UnroutedPos { pos: Pos },

    /// The request as a whole is unusable.
    #[error("bad request: {reason}")]
    BadRequest { reason: String },
}

/// A non-fatal condition noticed while inflecting. Tokens that cannot be
/// processed are passed through unchanged and reported through these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflectWarning {
    /// The token contains characters outside the German alphabet and was
    /// passed through unchanged.
    #[error("'{token}' is not in the German alphabet; passed through")]
    NonGermanAlphabet { token: String },

    /// The request for this token carried no features; passed through.
    #[error("empty target for '{token}'; passed through")]
    EmptyTarget { token: String },

    /// The target underdetermined a label; the named pairs were filled
    /// from category defaults.
    #[error("target for '{token}' was incomplete; assumed {added}")]
    DefaultedLabel { token: String, added: FeatureSet },
}

fn closest(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (closest: {})", suggestions.join(", "))
    }
}
