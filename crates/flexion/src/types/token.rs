use bon::Builder;

use super::{FeatureSet, Pos};

/// A pre-analyzed token handed in by the linguistic front-end.
///
/// Tokens are immutable inputs: inflectors never modify them. Lemma
/// corrections happen on call-local copies of the lemma string.
///
/// # Example
///
/// ```
/// use flexion::{Pos, Token, features};
///
/// let token = Token::builder()
///     .text("Haus")
///     .lemma("Haus")
///     .pos(Pos::Noun)
///     .morph(features! { "Gender" => "Neut" })
///     .build();
///
/// assert_eq!(token.norm(), "haus");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct Token {
    /// Surface text as it appeared in the sentence.
    pub text: String,

    /// Lowercased lookup form. Defaults to the lowercased `text`.
    norm: Option<String>,

    /// Dictionary form from the upstream analyzer.
    pub lemma: String,

    /// Part-of-speech tag.
    pub pos: Pos,

    /// Morphological analysis of the token as it stands.
    #[builder(default)]
    pub morph: FeatureSet,
}

impl Token {
    /// The lowercased form used for lexicon and automaton lookups.
    pub fn norm(&self) -> String {
        match &self.norm {
            Some(norm) => norm.clone(),
            None => self.text.to_lowercase(),
        }
    }
}
