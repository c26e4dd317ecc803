//! Verbs and auxiliaries: finite forms, imperatives, participles,
//! subjunctive umlaut and separable prefixes.
//!
//! Rule tables are written against the bare stem. The prefix complex is
//! peeled off before the table lookup and reattached afterwards.
//! Participles carry a `#` marker where `ge` belongs: `auf` + `#standen`
//! joins to `aufgestanden`, `ver` + `#standen` drops the marker, and a
//! bare stem spells it out as `gestanden`.

use std::sync::Arc;

use regex::Captures;

use super::adjective::Adjective;
use super::Paradigm;
use crate::error::InflectError;
use crate::regex;
use crate::types::FeatureSet;

const MODALS: [&str; 6] = [
    "dürfen", "können", "mögen", "müssen", "sollen", "wollen",
];

/// Auxiliaries and modals. Their paradigms are almost entirely
/// exceptional forms, and they never carry separable prefixes.
#[derive(Debug, Clone)]
pub struct Auxiliary {
    paradigm: Paradigm,
    adjective: Arc<Adjective>,
}

impl Auxiliary {
    pub fn new(paradigm: Paradigm, adjective: Arc<Adjective>) -> Self {
        Auxiliary { paradigm, adjective }
    }

    pub fn inflect(&self, lemma: &str, resolved: &FeatureSet) -> Result<String, InflectError> {
        let lemma = canonical_infinitive(lemma);
        reject_modal_imperative(lemma, resolved)?;
        if is_bare_infinitive(resolved) {
            return Ok(lemma.to_string());
        }
        let resolved = with_participle_tense(resolved);
        let form = subjunctive_umlaut(&self.paradigm.realize(lemma, &resolved)).replace('#', "ge");
        if resolved.get("Verbform") == Some("Part") {
            return Ok(self.adjective.decline(&form, &attributive_features(&resolved)));
        }
        Ok(form)
    }
}

/// Full verbs: the auxiliary pipeline plus prefix handling.
#[derive(Debug, Clone)]
pub struct Verb {
    paradigm: Paradigm,
    adjective: Arc<Adjective>,
    prefixes: Arc<PrefixInventory>,
}

impl Verb {
    pub fn new(
        paradigm: Paradigm,
        adjective: Arc<Adjective>,
        prefixes: Arc<PrefixInventory>,
    ) -> Self {
        Verb {
            paradigm,
            adjective,
            prefixes,
        }
    }

    pub fn inflect(&self, lemma: &str, resolved: &FeatureSet) -> Result<String, InflectError> {
        let lemma = canonical_infinitive(lemma);
        reject_modal_imperative(lemma, resolved)?;
        if is_bare_infinitive(resolved) {
            return Ok(lemma.to_string());
        }
        let resolved = with_participle_tense(resolved);
        let split = self.prefixes.split(lemma);
        let mut form = self.paradigm.realize(split.stem(), &resolved);
        // Verbs in -ieren build their participle without ge.
        if form.ends_with("iert") && !form.ends_with("#iert") {
            form = form.replace('#', "");
        }
        let form = subjunctive_umlaut(&form);
        let participle = resolved.get("Verbform") == Some("Part");
        let joined = split.join(&form, participle);
        if participle {
            return Ok(self
                .adjective
                .decline(&joined, &attributive_features(&resolved)));
        }
        Ok(joined)
    }
}

/// The separable and inseparable verb prefixes, ready for longest-first
/// matching against diphthong-collapsed stems.
#[derive(Debug, Default)]
pub struct PrefixInventory {
    entries: Vec<PrefixEntry>,
}

#[derive(Debug)]
struct PrefixEntry {
    text: String,
    collapsed: String,
    separable: bool,
}

impl PrefixEntry {
    fn new(text: String, separable: bool) -> Self {
        let collapsed = collapse(&text);
        PrefixEntry {
            text,
            collapsed,
            separable,
        }
    }
}

impl PrefixInventory {
    pub fn new(
        separable: impl IntoIterator<Item = String>,
        inseparable: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut entries: Vec<PrefixEntry> = separable
            .into_iter()
            .map(|text| PrefixEntry::new(text, true))
            .chain(
                inseparable
                    .into_iter()
                    .map(|text| PrefixEntry::new(text, false)),
            )
            .collect();
        // Longest first, so herauf wins over her.
        entries.sort_by(|a, b| {
            b.collapsed
                .len()
                .cmp(&a.collapsed.len())
                .then_with(|| a.text.cmp(&b.text))
        });
        PrefixInventory { entries }
    }

    /// Peel the prefix complex off a lemma. Peeling stops once another
    /// peel would leave the residue without a vowel, which keeps prefix
    /// lookalikes such as `einen` whole.
    pub(crate) fn split(&self, lemma: &str) -> PrefixSplit {
        let mut residue = collapse(strip_flexion(lemma));
        let mut peeled: Vec<&PrefixEntry> = Vec::new();
        'peel: loop {
            for entry in &self.entries {
                if let Some(rest) = residue.strip_prefix(entry.collapsed.as_str()) {
                    if has_stem_vowel(rest) {
                        peeled.push(entry);
                        residue = rest.to_string();
                        continue 'peel;
                    }
                }
            }
            break;
        }
        if peeled.is_empty() {
            return PrefixSplit::bare(lemma);
        }
        let prefix: String = peeled.iter().map(|entry| entry.text.as_str()).collect();
        let Some(stem) = lemma.strip_prefix(&prefix) else {
            return PrefixSplit::bare(lemma);
        };
        let separable = peeled.first().is_some_and(|entry| entry.separable)
            && peeled.last().is_some_and(|entry| entry.separable);
        PrefixSplit {
            stem: stem.to_string(),
            prefix,
            separable,
        }
    }
}

/// The outcome of prefix peeling; knows how to put the verb back
/// together once the stem is inflected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrefixSplit {
    stem: String,
    prefix: String,
    separable: bool,
}

impl PrefixSplit {
    fn bare(lemma: &str) -> Self {
        PrefixSplit {
            stem: lemma.to_string(),
            prefix: String::new(),
            separable: false,
        }
    }

    pub(crate) fn stem(&self) -> &str {
        &self.stem
    }

    /// Reattach the prefix complex and resolve the `ge` marker.
    /// Separable prefixes detach from finite forms, which come back as a
    /// `(form , prefix)` pair.
    pub(crate) fn join(&self, form: &str, participle: bool) -> String {
        if self.prefix.is_empty() {
            return form.replace('#', "ge");
        }
        if !self.separable {
            return format!("{}{}", self.prefix, form.replace('#', ""));
        }
        if participle {
            return format!("{}{}", self.prefix, form.replace('#', "ge"));
        }
        format!("({} , {})", form.replace('#', "ge"), self.prefix)
    }
}

/// Bare the lemma for prefix matching: drop the infinitive ending.
/// `tun` and `sein` lose only the `n`.
fn strip_flexion(lemma: &str) -> &str {
    if lemma.ends_with("tun") || lemma.ends_with("sein") {
        return &lemma[..lemma.len() - 1];
    }
    if let Some(core) = lemma.strip_suffix("en") {
        return core;
    }
    if let Some(core) = lemma.strip_suffix('n') {
        if core.ends_with(['l', 'r']) {
            return core;
        }
    }
    lemma
}

/// Collapse diphthongs to single markers so prefix matching cannot cut
/// through them and so they count as one vowel.
fn collapse(text: &str) -> String {
    regex!("ei|ie|eu|äu")
        .replace_all(text, |caps: &Captures<'_>| match &caps[0] {
            "ei" => "E",
            "ie" => "I",
            "eu" => "U",
            _ => "Y",
        })
        .into_owned()
}

fn has_stem_vowel(residue: &str) -> bool {
    residue.chars().any(|c| "aeiouyäöüEIUY".contains(c))
}

/// Subjunctive II forms mark their umlaut with `&`: every `a`, `o`, `u`
/// before the marker takes the diaeresis and the marker disappears.
fn subjunctive_umlaut(form: &str) -> String {
    let Some((head, tail)) = form.split_once('&') else {
        return form.to_string();
    };
    let head: String = head
        .chars()
        .map(|c| match c {
            'a' => 'ä',
            'o' => 'ö',
            'u' => 'ü',
            other => other,
        })
        .collect();
    format!("{head}{tail}")
}

fn canonical_infinitive(lemma: &str) -> &str {
    // Taggers lemmatize haben forms to habe.
    if lemma == "habe" {
        "haben"
    } else {
        lemma
    }
}

fn reject_modal_imperative(lemma: &str, resolved: &FeatureSet) -> Result<(), InflectError> {
    if resolved.get("Mood") == Some("Imp") && MODALS.contains(&lemma) {
        return Err(InflectError::ClosedParadigm {
            lemma: lemma.to_string(),
            label: resolved.to_string(),
            reason: "modal verbs have no imperative".to_string(),
        });
    }
    Ok(())
}

/// A target that resolved to exactly the bare infinitive label.
fn is_bare_infinitive(resolved: &FeatureSet) -> bool {
    resolved.len() == 1 && resolved.get("Verbform") == Some("Inf")
}

/// Participle requests without a tense mean the past participle.
fn with_participle_tense(resolved: &FeatureSet) -> FeatureSet {
    if resolved.get("Verbform") == Some("Part") && !resolved.contains("Tense") {
        return resolved.with("Tense", "Past");
    }
    resolved.clone()
}

/// Features for declining a participle attributively: tense is already
/// baked into the form and degree defaults to positive.
fn attributive_features(resolved: &FeatureSet) -> FeatureSet {
    let mut features = resolved.clone();
    features.remove("Tense");
    features.insert("Degree", "Pos");
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Automaton, Lexicon};
    use crate::schema::Schema;
    use crate::types::Pos;

    fn schema() -> Schema {
        Schema::from_json(
            r#"{
                "categories": [
                    {"name": "Mood", "values": ["Ind", "Sub", "Imp"]},
                    {"name": "Number", "values": ["Sing", "Plur"]},
                    {"name": "Person", "values": ["3", "1", "2"]},
                    {"name": "Tense", "values": ["Pres", "Past"]},
                    {"name": "Verbform", "values": ["Fin", "Inf", "Part"]},
                    {"name": "Case", "values": ["Nom", "Gen", "Dat", "Acc"]},
                    {"name": "Gender", "values": ["Masc", "Fem", "Neut"]},
                    {"name": "Declination", "values": ["Weak", "Mixed", "Strong"]},
                    {"name": "Degree", "values": ["Pos", "Cmp", "Sup"]}
                ],
                "labels": {}
            }"#,
        )
        .unwrap()
    }

    fn paradigm(lexicon: &str, automaton: &str) -> Paradigm {
        let schema = schema();
        let (lexicon, skipped) = Lexicon::parse(lexicon, &schema);
        assert!(skipped.is_empty());
        let (automaton, skipped) = Automaton::parse(automaton, &schema);
        assert!(skipped.is_empty());
        Paradigm::new(Some(Arc::new(lexicon)), Some(Arc::new(automaton)))
    }

    fn adjective() -> Arc<Adjective> {
        let schema = schema();
        let (automaton, _) = Automaton::parse(
            "$+Case=Nom|Declination=Weak|Gender=Masc|Number=Sing->e",
            &schema,
        );
        Arc::new(Adjective::new(
            Pos::Adj,
            Paradigm::new(None, Some(Arc::new(automaton))),
        ))
    }

    fn inventory() -> Arc<PrefixInventory> {
        let separable = ["auf", "ein", "mit", "heraus", "her", "wieder"]
            .map(String::from)
            .to_vec();
        let inseparable = ["be", "ent", "er", "ver", "zer"].map(String::from).to_vec();
        Arc::new(PrefixInventory::new(separable, inseparable))
    }

    fn verb(lexicon: &str, automaton: &str) -> Verb {
        Verb::new(paradigm(lexicon, automaton), adjective(), inventory())
    }

    fn features(text: &str) -> FeatureSet {
        text.parse().unwrap()
    }

    // === prefix peeling ===

    #[test]
    fn separable_prefix_is_peeled() {
        let split = inventory().split("aufstehen");
        assert_eq!(split.stem(), "stehen");
        assert_eq!(split.prefix, "auf");
        assert!(split.separable);
    }

    #[test]
    fn inseparable_prefix_is_peeled() {
        let split = inventory().split("verstehen");
        assert_eq!(split.stem(), "stehen");
        assert!(!split.separable);
    }

    #[test]
    fn diphthong_prefixes_match_collapsed() {
        let split = inventory().split("einkaufen");
        assert_eq!(split.stem(), "kaufen");
        assert_eq!(split.prefix, "ein");
    }

    #[test]
    fn longest_prefix_wins() {
        let split = inventory().split("herausgeben");
        assert_eq!(split.prefix, "heraus");
        assert_eq!(split.stem(), "geben");
    }

    #[test]
    fn stacked_prefixes_accumulate() {
        let split = inventory().split("wiederaufstehen");
        assert_eq!(split.prefix, "wiederauf");
        assert_eq!(split.stem(), "stehen");
        assert!(split.separable);
    }

    #[test]
    fn prefix_lookalikes_stay_whole() {
        // Peeling ein- would leave a vowelless residue.
        let split = inventory().split("einen");
        assert_eq!(split.stem(), "einen");
        assert_eq!(split.prefix, "");
    }

    #[test]
    fn peeled_parts_reassemble_to_the_lemma() {
        let inventory = inventory();
        for lemma in [
            "aufstehen",
            "verstehen",
            "einkaufen",
            "herausgeben",
            "wiederaufstehen",
            "geben",
            "sammeln",
            "tun",
            "sein",
        ] {
            let split = inventory.split(lemma);
            assert_eq!(format!("{}{}", split.prefix, split.stem()), lemma);
        }
    }

    // === joining ===

    #[test]
    fn bare_stem_spells_out_ge() {
        let split = inventory().split("stehen");
        assert_eq!(split.join("#standen", true), "gestanden");
    }

    #[test]
    fn separable_participle_keeps_ge_inside() {
        let split = inventory().split("aufstehen");
        assert_eq!(split.join("#standen", true), "aufgestanden");
    }

    #[test]
    fn inseparable_prefix_swallows_ge() {
        let split = inventory().split("verstehen");
        assert_eq!(split.join("#standen", true), "verstanden");
    }

    #[test]
    fn separable_finite_form_detaches() {
        let split = inventory().split("aufstehen");
        assert_eq!(split.join("steht", false), "(steht , auf)");
    }

    // === full pipeline ===

    #[test]
    fn suppletive_past_from_the_lexicon() {
        let verb = verb("geben+Mood=Ind|Tense=Past->gab", "");
        let target = features("Mood=Ind|Number=Sing|Person=3|Tense=Past|Verbform=Fin");
        assert_eq!(verb.inflect("geben", &target).unwrap(), "gab");
    }

    #[test]
    fn subjunctive_marker_umlauts_the_stem() {
        let verb = verb("geben+Mood=Sub|Number=Sing|Person=[1,3]|Tense=Past->gab&e", "");
        let target = features("Mood=Sub|Number=Sing|Person=3|Tense=Past|Verbform=Fin");
        assert_eq!(verb.inflect("geben", &target).unwrap(), "gäbe");
    }

    #[test]
    fn separable_verb_detaches_in_finite_forms() {
        let rules = "en$+Mood=Ind|Number=Sing|Person=3|Tense=Pres->t";
        let verb = verb("", rules);
        let target = features("Mood=Ind|Number=Sing|Person=3|Tense=Pres|Verbform=Fin");
        assert_eq!(verb.inflect("aufstehen", &target).unwrap(), "(steht , auf)");
    }

    #[test]
    fn separable_participle_joins_up() {
        let verb = verb("stehen+Tense=Past|Verbform=Part->#standen", "");
        let target = features("Tense=Past|Verbform=Part");
        assert_eq!(verb.inflect("aufstehen", &target).unwrap(), "aufgestanden");
    }

    #[test]
    fn inseparable_participle_drops_ge() {
        let verb = verb("stehen+Tense=Past|Verbform=Part->#standen", "");
        let target = features("Tense=Past|Verbform=Part");
        assert_eq!(verb.inflect("verstehen", &target).unwrap(), "verstanden");
    }

    #[test]
    fn participle_requests_default_to_past() {
        let verb = verb("geben+Tense=Past|Verbform=Part->#geben", "");
        assert_eq!(
            verb.inflect("geben", &features("Verbform=Part")).unwrap(),
            "gegeben"
        );
    }

    #[test]
    fn ieren_verbs_build_ge_less_participles() {
        let rules = "en$+Tense=Past|Verbform=Part->t\n^+Tense=Past|Verbform=Part->#";
        let verb = verb("", rules);
        let target = features("Tense=Past|Verbform=Part");
        assert_eq!(verb.inflect("studieren", &target).unwrap(), "studiert");
        assert_eq!(verb.inflect("machen", &target).unwrap(), "gemacht");
    }

    #[test]
    fn attributive_participle_declines_adjectivally() {
        let verb = verb("geben+Tense=Past|Verbform=Part->#geben", "");
        let target =
            features("Case=Nom|Declination=Weak|Gender=Masc|Number=Sing|Tense=Past|Verbform=Part");
        assert_eq!(verb.inflect("geben", &target).unwrap(), "gegebene");
    }

    #[test]
    fn bare_infinitive_short_circuits() {
        let verb = verb("geben+Tense=Past->gab", "");
        assert_eq!(
            verb.inflect("geben", &features("Verbform=Inf")).unwrap(),
            "geben"
        );
    }

    #[test]
    fn modal_imperative_is_closed() {
        let verb = verb("", "");
        let target = features("Mood=Imp|Number=Sing|Verbform=Fin");
        assert!(matches!(
            verb.inflect("können", &target),
            Err(InflectError::ClosedParadigm { .. })
        ));
    }

    #[test]
    fn auxiliary_repairs_the_habe_lemma() {
        let auxiliary = Auxiliary::new(
            paradigm("haben+Mood=Ind|Number=Sing|Person=1|Tense=Pres->habe", ""),
            adjective(),
        );
        assert_eq!(
            auxiliary
                .inflect("habe", &features("Verbform=Inf"))
                .unwrap(),
            "haben"
        );
        let target = features("Mood=Ind|Number=Sing|Person=1|Tense=Pres|Verbform=Fin");
        assert_eq!(auxiliary.inflect("habe", &target).unwrap(), "habe");
    }

    #[test]
    fn auxiliary_subjunctive_umlaut() {
        let auxiliary = Auxiliary::new(
            paradigm("sein+Mood=Sub|Number=Sing|Person=[1,3]|Tense=Past->war&e", ""),
            adjective(),
        );
        let target = features("Mood=Sub|Number=Sing|Person=3|Tense=Past|Verbform=Fin");
        assert_eq!(auxiliary.inflect("sein", &target).unwrap(), "wäre");
    }

    #[test]
    fn auxiliary_participle_defaults_its_tense() {
        let auxiliary = Auxiliary::new(
            paradigm("haben+Tense=Past|Verbform=Part->gehabt", ""),
            adjective(),
        );
        assert_eq!(
            auxiliary
                .inflect("haben", &features("Verbform=Part"))
                .unwrap(),
            "gehabt"
        );
    }
}
