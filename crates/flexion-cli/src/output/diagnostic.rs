//! Miette diagnostic wrapper for refused rule lines.

use std::fs;

use flexion::tables::SkippedLine;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a rule line the loader refused.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("skipped rule: {reason}")]
#[diagnostic(code(flexion::rules))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("refused here")]
    span: SourceSpan,

    reason: String,
}

impl RuleDiagnostic {
    /// Create a diagnostic with source context read back from the rule
    /// file. Returns None when the file is not on disk, as with the
    /// builtin tables.
    pub fn from_skipped(skip: &SkippedLine) -> Option<Self> {
        let content = fs::read_to_string(&skip.path).ok()?;
        let index = skip.line.saturating_sub(1);

        // Convert the line number to a byte offset spanning the line.
        let offset = content
            .lines()
            .take(index)
            .map(|line| line.len() + 1)
            .sum::<usize>();
        let length = content.lines().nth(index).map_or(1, str::len).max(1);
        let offset = offset.min(content.len());

        Some(RuleDiagnostic {
            src: NamedSource::new(skip.path.display().to_string(), content),
            span: (offset, length).into(),
            reason: skip.reason.clone(),
        })
    }
}
