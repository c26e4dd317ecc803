//! Proper names. Only the genitive changes shape, so the route is a
//! plain automaton pass.

use super::Paradigm;
use crate::types::FeatureSet;

#[derive(Debug, Clone)]
pub struct Proper {
    paradigm: Paradigm,
}

impl Proper {
    pub fn new(paradigm: Paradigm) -> Self {
        Proper { paradigm }
    }

    pub fn inflect(&self, lemma: &str, resolved: &FeatureSet) -> String {
        self.paradigm.realize(lemma, resolved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rules::Automaton;
    use crate::schema::Schema;

    fn proper() -> Proper {
        let schema = Schema::from_json(
            r#"{
                "categories": [
                    {"name": "Case", "values": ["Nom", "Gen", "Dat", "Acc"]}
                ],
                "labels": {}
            }"#,
        )
        .unwrap();
        let rules = "([sßxz])$+Case=Gen->${1}'\n([^sßxz'])$+Case=Gen->${1}s";
        let (automaton, skipped) = Automaton::parse(rules, &schema);
        assert!(skipped.is_empty());
        Proper::new(Paradigm::new(None, Some(Arc::new(automaton))))
    }

    fn features(text: &str) -> FeatureSet {
        text.parse().unwrap()
    }

    #[test]
    fn genitive_s_after_non_sibilants() {
        assert_eq!(proper().inflect("anna", &features("Case=Gen")), "annas");
        assert_eq!(proper().inflect("berlin", &features("Case=Gen")), "berlins");
    }

    #[test]
    fn sibilant_finals_take_an_apostrophe() {
        assert_eq!(proper().inflect("hans", &features("Case=Gen")), "hans'");
        assert_eq!(proper().inflect("marx", &features("Case=Gen")), "marx'");
    }

    #[test]
    fn non_genitive_targets_pass_through() {
        assert_eq!(proper().inflect("anna", &features("Case=Dat")), "anna");
    }
}
