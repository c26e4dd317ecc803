//! Rule files and their matching semantics.
//!
//! Inflection data lives in plain-text rule files of two kinds. *Lexicon*
//! files list exceptional forms per lemma and are consulted first; a hit
//! consumes the features its condition covers. *Automaton* files hold
//! ordered regular rewrite rules that realize whatever features remain.

mod automaton;
mod condition;
mod lexicon;
mod line;

pub use automaton::{Automaton, AutomatonRule};
pub use condition::RuleCondition;
pub use lexicon::{Lexicon, LexiconRule};

/// A line that failed to compile, with its position and the reason.
/// Loading never aborts on bad lines; they surface through these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    /// 1-based line number within the file.
    pub line: usize,
    /// The offending line, verbatim.
    pub text: String,
    pub reason: String,
}
