//! Articles, demonstratives and possessive determiners.

use super::Paradigm;
use crate::error::InflectError;
use crate::regex;
use crate::types::FeatureSet;

#[derive(Debug, Clone)]
pub struct Determiner {
    paradigm: Paradigm,
}

impl Determiner {
    pub fn new(paradigm: Paradigm) -> Self {
        Determiner { paradigm }
    }

    pub fn inflect(
        &self,
        norm: &str,
        lemma: &str,
        resolved: &FeatureSet,
    ) -> Result<String, InflectError> {
        if resolved.get("Number") == Some("Plur") && regex!("^ein(e[mnrs]?)?$").is_match(lemma) {
            return Err(InflectError::ClosedParadigm {
                lemma: lemma.to_string(),
                label: resolved.to_string(),
                reason: "the indefinite article has no plural".to_string(),
            });
        }
        let base = if resolved.get("Poss") == Some("Yes") {
            possessive_base(norm)
        } else {
            lemma
        };
        Ok(self.paradigm.realize(base, resolved))
    }
}

/// Possessive lemmas are unreliable, `ihr` and `euer` in particular get
/// mixed up, so the base is recovered from the surface form instead.
fn possessive_base(norm: &str) -> &str {
    if regex!("eue?r").is_match(norm) {
        return "euer";
    }
    match regex!("[dms]ein|unser|ihr").find(norm) {
        Some(found) => found.as_str(),
        None => "mein",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rules::{Automaton, Lexicon};
    use crate::schema::Schema;

    fn schema() -> Schema {
        Schema::from_json(
            r#"{
                "categories": [
                    {"name": "Case", "values": ["Nom", "Gen", "Dat", "Acc"]},
                    {"name": "Gender", "values": ["Masc", "Fem", "Neut"]},
                    {"name": "Number", "values": ["Sing", "Plur"]},
                    {"name": "Poss", "values": ["Yes"]},
                    {"name": "Prontype", "values": ["Art", "Dem"]}
                ],
                "labels": {}
            }"#,
        )
        .unwrap()
    }

    fn determiner(lexicon: &str, automaton: &str) -> Determiner {
        let schema = schema();
        let (lexicon, skipped) = Lexicon::parse(lexicon, &schema);
        assert!(skipped.is_empty());
        let (automaton, skipped) = Automaton::parse(automaton, &schema);
        assert!(skipped.is_empty());
        Determiner::new(Paradigm::new(Some(Arc::new(lexicon)), Some(Arc::new(automaton))))
    }

    fn features(text: &str) -> FeatureSet {
        text.parse().unwrap()
    }

    #[test]
    fn definite_article_from_the_lexicon() {
        let determiner = determiner("der+Case=Dat|Gender=Fem|Number=Sing|Prontype=Art->der", "");
        let target = features("Case=Dat|Gender=Fem|Number=Sing|Prontype=Art");
        assert_eq!(determiner.inflect("die", "der", &target).unwrap(), "der");
    }

    #[test]
    fn indefinite_article_has_no_plural() {
        let determiner = determiner("", "");
        for lemma in ["ein", "eine", "einer"] {
            let err = determiner
                .inflect(lemma, lemma, &features("Case=Nom|Number=Plur"))
                .unwrap_err();
            assert!(matches!(err, InflectError::ClosedParadigm { .. }));
        }
    }

    #[test]
    fn possessive_plural_is_not_caught_by_the_ein_check() {
        let determiner = determiner(
            "mein+Case=Nom|Number=Plur|Poss=Yes->meine",
            "",
        );
        let target = features("Case=Nom|Number=Plur|Poss=Yes");
        assert_eq!(
            determiner.inflect("meine", "mein", &target).unwrap(),
            "meine"
        );
    }

    #[test]
    fn possessive_base_comes_from_the_surface() {
        let determiner = determiner("euer+Case=Dat|Gender=Masc|Number=Sing|Poss=Yes->eurem", "");
        let target = features("Case=Dat|Gender=Masc|Number=Sing|Poss=Yes");
        // Taggers lemmatize euer forms as ihr.
        assert_eq!(
            determiner.inflect("eure", "ihr", &target).unwrap(),
            "eurem"
        );
    }

    #[test]
    fn surface_recovery_table() {
        assert_eq!(possessive_base("eurem"), "euer");
        assert_eq!(possessive_base("euren"), "euer");
        assert_eq!(possessive_base("deinem"), "dein");
        assert_eq!(possessive_base("seiner"), "sein");
        assert_eq!(possessive_base("unserem"), "unser");
        assert_eq!(possessive_base("ihren"), "ihr");
        assert_eq!(possessive_base("xyz"), "mein");
    }

    #[test]
    fn demonstratives_run_the_automaton() {
        let rules =
            "er$+Case=Dat|Gender=Fem|Number=Sing->er\ner$+Case=Dat|Gender=Masc|Number=Sing->em";
        let determiner = determiner("", rules);
        let target = features("Case=Dat|Gender=Masc|Number=Sing|Prontype=Dem");
        assert_eq!(
            determiner.inflect("diesem", "dieser", &target).unwrap(),
            "diesem"
        );
    }
}
