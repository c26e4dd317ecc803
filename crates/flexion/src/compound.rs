//! Compound splitting for nouns the tables do not know.
//!
//! German nominal compounds inflect on their head, and the head is final:
//! `haustür` pluralizes to `haustüren` because `tür` does. When a noun
//! lemma has no entry of its own, the engine asks a [`CompoundAnalyzer`]
//! for a split and inflects the head alone, gluing the modifier back in
//! front of the result.

use std::collections::BTreeSet;
use std::fmt::Debug;

/// A compound split. `modifier` is everything before the head, linking
/// elements included, and is carried through inflection verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub modifier: String,
    pub head: String,
}

/// Strategy for locating the head of an unknown compound.
pub trait CompoundAnalyzer: Debug + Send + Sync {
    /// Split `word`, or `None` when no split is known. Implementations
    /// must return a non-empty modifier, so the head is strictly shorter
    /// than the word.
    fn split(&self, word: &str) -> Option<Split>;
}

/// Never splits. Unknown nouns then fall through to the suffix rules on
/// the whole word.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompounds;

impl CompoundAnalyzer for NoCompounds {
    fn split(&self, _word: &str) -> Option<Split> {
        None
    }
}

const MIN_MODIFIER_CHARS: usize = 2;
const MIN_HEAD_CHARS: usize = 3;

/// Splits on the longest known head: the earliest boundary whose suffix
/// is in the word table wins. Linking elements stay with the modifier,
/// which is where `arbeitszimmer` keeps its `s`.
#[derive(Debug)]
pub struct TableSplitter {
    known: BTreeSet<String>,
}

impl TableSplitter {
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        TableSplitter {
            known: words.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl CompoundAnalyzer for TableSplitter {
    fn split(&self, word: &str) -> Option<Split> {
        for (i, _) in word.char_indices().skip(1) {
            let (modifier, head) = word.split_at(i);
            if modifier.chars().count() < MIN_MODIFIER_CHARS {
                continue;
            }
            if head.chars().count() < MIN_HEAD_CHARS {
                break;
            }
            if self.known.contains(head) {
                return Some(Split {
                    modifier: modifier.to_string(),
                    head: head.to_string(),
                });
            }
        }
        None
    }
}
