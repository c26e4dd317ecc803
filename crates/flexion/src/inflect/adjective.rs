//! Adjective and adverb inflection: degree forms, attributive endings,
//! and the `#` umlaut marker.
//!
//! The same inflector serves both parts of speech; the router decides
//! which rule tables it runs on. Verbs and nouns borrow it for
//! participle and nominalized-adjective declension through [`Adjective::decline`].

use super::Paradigm;
use crate::types::{FeatureSet, Pos};

#[derive(Debug, Clone)]
pub struct Adjective {
    pos: Pos,
    paradigm: Paradigm,
}

impl Adjective {
    pub fn new(pos: Pos, paradigm: Paradigm) -> Self {
        Adjective { pos, paradigm }
    }

    pub fn inflect(&self, norm: &str, lemma: &str, resolved: &FeatureSet) -> String {
        let lemma = self.fixed_lemma(norm, lemma, resolved);
        resolve_umlaut(&self.paradigm.realize(&lemma, resolved))
    }

    /// Declension entry for stems that already carry their own shape,
    /// participles and nominalized adjectives: ending rewrites only, no
    /// exceptional-form lookup.
    pub fn decline(&self, stem: &str, features: &FeatureSet) -> String {
        resolve_umlaut(&self.paradigm.rewrite(stem, features))
    }

    /// Taggers hand over broken lemmas in two common shapes; undo them
    /// before the table lookup.
    fn fixed_lemma(&self, norm: &str, lemma: &str, resolved: &FeatureSet) -> String {
        match self.pos {
            // Adverb lemmas sometimes carry a spurious -en.
            Pos::Adv if format!("{norm}en") == lemma => norm.to_string(),
            // An inflected surface form left as its own lemma.
            Pos::Adj if norm == lemma && resolved.len() > 1 => {
                strip_weak_ending(lemma).to_string()
            }
            _ => lemma.to_string(),
        }
    }
}

/// True if the word ends in a weak adjectival ending, `-e` optionally
/// followed by one of `m n r s`.
pub(crate) fn has_weak_ending(text: &str) -> bool {
    ["em", "en", "er", "es", "e"]
        .iter()
        .any(|ending| text.ends_with(ending))
}

/// Strip one weak adjectival ending, longest first.
pub(crate) fn strip_weak_ending(text: &str) -> &str {
    for ending in ["em", "en", "er", "es"] {
        if let Some(core) = text.strip_suffix(ending) {
            return core;
        }
    }
    text.strip_suffix('e').unwrap_or(text)
}

/// Resolve the `#` umlaut marker. A single marker directly before `a`,
/// `o` or `u` fuses with it; any other marker is dropped. Total and
/// idempotent, so running it on unmarked text is a no-op.
pub(crate) fn resolve_umlaut(form: &str) -> String {
    let marks: Vec<usize> = form.match_indices('#').map(|(i, _)| i).collect();
    if let [mark] = marks[..] {
        let rest = &form[mark + 1..];
        if let Some(next) = rest.chars().next() {
            if let Some(umlaut) = umlauted(next) {
                let mut out = String::with_capacity(form.len());
                out.push_str(&form[..mark]);
                out.push(umlaut);
                out.push_str(&rest[next.len_utf8()..]);
                return out;
            }
        }
    }
    form.replace('#', "")
}

fn umlauted(c: char) -> Option<char> {
    match c {
        'a' => Some('ä'),
        'o' => Some('ö'),
        'u' => Some('ü'),
        _ => None,
    }
}
