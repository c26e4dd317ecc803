//! Loading rule tables from a data directory.
//!
//! A table directory holds `schema.json`, `router.json`, `prefixes.json`
//! and the rule files the router names. Routes may share rule files;
//! each file is parsed once and shared. Lines the parsers refuse are
//! collected into a [`LoadReport`] instead of failing the load.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::inflect::{Paradigm, PrefixInventory};
use crate::rules::{Automaton, Lexicon, SkippedRule};
use crate::schema::Schema;
use crate::types::Pos;

const SCHEMA_FILE: &str = "schema.json";
const ROUTER_FILE: &str = "router.json";
const PREFIX_FILE: &str = "prefixes.json";

const DE_SCHEMA: &str = include_str!("../data/de/schema.json");
const DE_ROUTER: &str = include_str!("../data/de/router.json");
const DE_PREFIXES: &str = include_str!("../data/de/prefixes.json");

const DE_RULE_FILES: [(&str, &str); 14] = [
    (
        "automaton/adjective.rules",
        include_str!("../data/de/automaton/adjective.rules"),
    ),
    (
        "automaton/adverb.rules",
        include_str!("../data/de/automaton/adverb.rules"),
    ),
    (
        "automaton/determiner.rules",
        include_str!("../data/de/automaton/determiner.rules"),
    ),
    (
        "automaton/noun.rules",
        include_str!("../data/de/automaton/noun.rules"),
    ),
    (
        "automaton/proper.rules",
        include_str!("../data/de/automaton/proper.rules"),
    ),
    (
        "automaton/verb.rules",
        include_str!("../data/de/automaton/verb.rules"),
    ),
    (
        "lexicon/adjective.rules",
        include_str!("../data/de/lexicon/adjective.rules"),
    ),
    (
        "lexicon/adposition.rules",
        include_str!("../data/de/lexicon/adposition.rules"),
    ),
    (
        "lexicon/adverb.rules",
        include_str!("../data/de/lexicon/adverb.rules"),
    ),
    (
        "lexicon/auxiliary.rules",
        include_str!("../data/de/lexicon/auxiliary.rules"),
    ),
    (
        "lexicon/determiner.rules",
        include_str!("../data/de/lexicon/determiner.rules"),
    ),
    (
        "lexicon/noun.rules",
        include_str!("../data/de/lexicon/noun.rules"),
    ),
    (
        "lexicon/pronoun.rules",
        include_str!("../data/de/lexicon/pronoun.rules"),
    ),
    (
        "lexicon/verb.rules",
        include_str!("../data/de/lexicon/verb.rules"),
    ),
];

/// Which inflector a route builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflectorKind {
    Uninflected,
    Adjective,
    Adposition,
    Determiner,
    Noun,
    Pronoun,
    Proper,
    Auxiliary,
    Verb,
}

/// One router entry: the inflector kind plus the rule files it runs on,
/// as paths relative to the table directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub kind: InflectorKind,
    #[serde(default)]
    pub lexicon: Option<String>,
    #[serde(default)]
    pub automaton: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouterFile {
    routes: BTreeMap<Pos, Route>,
}

#[derive(Debug, Default, Deserialize)]
struct PrefixFile {
    #[serde(default)]
    separable: Vec<String>,
    #[serde(default)]
    inseparable: Vec<String>,
}

/// A rule line the parsers refused, with enough context to fix the
/// data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// Everything the load survived but did not accept.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn extend(&mut self, path: &Path, skipped: Vec<SkippedRule>) {
        for skip in skipped {
            self.skipped.push(SkippedLine {
                path: path.to_path_buf(),
                line: skip.line,
                text: skip.text,
                reason: skip.reason,
            });
        }
    }
}

/// The loaded rule tables of one language.
#[derive(Debug)]
pub struct Tables {
    schema: Arc<Schema>,
    routes: BTreeMap<Pos, Route>,
    lexicons: BTreeMap<String, Arc<Lexicon>>,
    automata: BTreeMap<String, Arc<Automaton>>,
    prefixes: Arc<PrefixInventory>,
    report: LoadReport,
}

impl Tables {
    /// The German tables shipped with the crate.
    pub fn builtin_german() -> Result<Tables, LoadError> {
        let files: BTreeMap<&str, &str> = DE_RULE_FILES.into_iter().collect();
        Tables::from_sources(
            Path::new("<de>"),
            DE_SCHEMA,
            DE_ROUTER,
            Some(DE_PREFIXES),
            |relative| {
                files.get(relative).map(|text| (*text).to_string()).ok_or_else(|| {
                    LoadError::Io {
                        path: PathBuf::from("<de>").join(relative),
                        source: io::Error::new(io::ErrorKind::NotFound, "not a builtin file"),
                    }
                })
            },
        )
    }

    /// Load tables from a directory on disk.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Tables, LoadError> {
        let dir = dir.as_ref();
        let schema = read_file(dir, SCHEMA_FILE)?;
        let router = read_file(dir, ROUTER_FILE)?;
        let prefixes = match read_file(dir, PREFIX_FILE) {
            Ok(text) => Some(text),
            Err(LoadError::Io { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                None
            }
            Err(e) => return Err(e),
        };
        Tables::from_sources(dir, &schema, &router, prefixes.as_deref(), |relative| {
            read_file(dir, relative)
        })
    }

    fn from_sources(
        dir: &Path,
        schema_text: &str,
        router_text: &str,
        prefix_text: Option<&str>,
        mut read: impl FnMut(&str) -> Result<String, LoadError>,
    ) -> Result<Tables, LoadError> {
        let schema = Arc::new(Schema::from_json(schema_text).map_err(|source| {
            LoadError::Schema {
                path: dir.join(SCHEMA_FILE),
                source,
            }
        })?);
        let router: RouterFile =
            serde_json::from_str(router_text).map_err(|source| LoadError::Json {
                path: dir.join(ROUTER_FILE),
                source,
            })?;
        let prefixes = match prefix_text {
            Some(text) => {
                let file: PrefixFile =
                    serde_json::from_str(text).map_err(|source| LoadError::Json {
                        path: dir.join(PREFIX_FILE),
                        source,
                    })?;
                PrefixInventory::new(file.separable, file.inseparable)
            }
            None => PrefixInventory::default(),
        };

        let mut report = LoadReport::default();
        let mut lexicons: BTreeMap<String, Arc<Lexicon>> = BTreeMap::new();
        let mut automata: BTreeMap<String, Arc<Automaton>> = BTreeMap::new();
        for (pos, route) in &router.routes {
            if route.kind != InflectorKind::Uninflected
                && route.lexicon.is_none()
                && route.automaton.is_none()
            {
                return Err(LoadError::EmptyRoute { pos: *pos });
            }
            if let Some(name) = &route.lexicon {
                if !lexicons.contains_key(name) {
                    let text = read(name)?;
                    let (lexicon, skipped) = Lexicon::parse(&text, &schema);
                    report.extend(&dir.join(name), skipped);
                    lexicons.insert(name.clone(), Arc::new(lexicon));
                }
            }
            if let Some(name) = &route.automaton {
                if !automata.contains_key(name) {
                    let text = read(name)?;
                    let (automaton, skipped) = Automaton::parse(&text, &schema);
                    report.extend(&dir.join(name), skipped);
                    automata.insert(name.clone(), Arc::new(automaton));
                }
            }
        }

        Ok(Tables {
            schema,
            routes: router.routes,
            lexicons,
            automata,
            prefixes: Arc::new(prefixes),
            report,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn route(&self, pos: Pos) -> Option<&Route> {
        self.routes.get(&pos)
    }

    pub fn routes(&self) -> impl Iterator<Item = (Pos, &Route)> {
        self.routes.iter().map(|(pos, route)| (*pos, route))
    }

    pub(crate) fn lexicon(&self, name: &str) -> Option<Arc<Lexicon>> {
        self.lexicons.get(name).cloned()
    }

    /// Assemble the rule-table pair a route points at.
    pub(crate) fn paradigm(&self, route: &Route) -> Paradigm {
        let lexicon = route
            .lexicon
            .as_ref()
            .and_then(|name| self.lexicons.get(name).cloned());
        let automaton = route
            .automaton
            .as_ref()
            .and_then(|name| self.automata.get(name).cloned());
        Paradigm::new(lexicon, automaton)
    }

    pub fn prefixes(&self) -> &Arc<PrefixInventory> {
        &self.prefixes
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Accepted rules per loaded file, keyed by the route-relative path.
    pub fn rule_counts(&self) -> BTreeMap<&str, usize> {
        let lexicons = self
            .lexicons
            .iter()
            .map(|(name, lexicon)| (name.as_str(), lexicon.len()));
        let automata = self
            .automata
            .iter()
            .map(|(name, automaton)| (name.as_str(), automaton.len()));
        lexicons.chain(automata).collect()
    }
}

fn read_file(dir: &Path, relative: &str) -> Result<String, LoadError> {
    let path = dir.join(relative);
    fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SCHEMA: &str = r#"{
        "categories": [
            {"name": "Case", "values": ["Nom", "Gen", "Dat", "Acc"]},
            {"name": "Number", "values": ["Sing", "Plur"]}
        ],
        "labels": {}
    }"#;

    fn write(dir: &Path, relative: &str, text: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn loads_routes_and_shares_rule_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "schema.json", SCHEMA);
        write(
            dir.path(),
            "router.json",
            r#"{
                "routes": {
                    "NOUN": {"kind": "noun", "lexicon": "shared.rules"},
                    "PROPN": {"kind": "proper", "lexicon": "shared.rules"},
                    "X": {"kind": "uninflected"}
                }
            }"#,
        );
        write(dir.path(), "shared.rules", "mann+Number=Plur->männer");
        let tables = Tables::from_dir(dir.path()).unwrap();

        assert!(tables.report().is_clean());
        assert_eq!(tables.routes().count(), 3);
        let noun = tables.route(Pos::Noun).unwrap();
        let proper = tables.route(Pos::Propn).unwrap();
        let noun_lexicon = tables.lexicon(noun.lexicon.as_deref().unwrap()).unwrap();
        let proper_lexicon = tables.lexicon(proper.lexicon.as_deref().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&noun_lexicon, &proper_lexicon));
    }

    #[test]
    fn bad_lines_end_up_in_the_report() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "schema.json", SCHEMA);
        write(
            dir.path(),
            "router.json",
            r#"{"routes": {"NOUN": {"kind": "noun", "lexicon": "noun.rules"}}}"#,
        );
        write(
            dir.path(),
            "noun.rules",
            "mann+Number=Plur->männer\nnonsense\nfrau+Number=Plur->frauen",
        );
        let tables = Tables::from_dir(dir.path()).unwrap();

        let report = tables.report();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert_eq!(report.skipped[0].text, "nonsense");
        assert!(report.skipped[0].path.ends_with("noun.rules"));
    }

    #[test]
    fn route_without_rule_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "schema.json", SCHEMA);
        write(
            dir.path(),
            "router.json",
            r#"{"routes": {"NOUN": {"kind": "noun"}}}"#,
        );
        assert!(matches!(
            Tables::from_dir(dir.path()),
            Err(LoadError::EmptyRoute { pos: Pos::Noun })
        ));
    }

    #[test]
    fn missing_rule_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "schema.json", SCHEMA);
        write(
            dir.path(),
            "router.json",
            r#"{"routes": {"NOUN": {"kind": "noun", "lexicon": "absent.rules"}}}"#,
        );
        assert!(matches!(
            Tables::from_dir(dir.path()),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn builtin_german_loads_clean() {
        let tables = Tables::builtin_german().unwrap();
        assert!(tables.report().is_clean(), "{:?}", tables.report());
        for pos in Pos::ALL {
            assert!(tables.route(pos).is_some(), "no route for {pos}");
        }
    }
}
