//! Implementation of the `flexion inflect` command.

use std::path::PathBuf;

use flexion::{FeatureSet, Inflector, Pos, Token};
use miette::miette;
use serde::Serialize;

use super::load_tables;

/// Arguments for the inflect command.
#[derive(Debug, clap::Args)]
pub struct InflectArgs {
    /// Dictionary form of the token
    #[arg(long, required = true)]
    pub lemma: String,

    /// Part-of-speech tag (e.g. NOUN, VERB, ADJ)
    #[arg(long, required = true)]
    pub pos: Pos,

    /// Target features in Cat=Val|Cat=Val notation
    #[arg(long, required = true)]
    pub features: FeatureSet,

    /// Morphological analysis of the token as it stands
    #[arg(long)]
    pub morph: Option<FeatureSet>,

    /// Surface text, when it differs from the lemma
    #[arg(long)]
    pub text: Option<String>,

    /// Directory with rule tables. Defaults to the builtin German tables.
    #[arg(long)]
    pub tables: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for inflect results.
#[derive(Serialize)]
pub struct InflectResult {
    pub form: String,
    pub warnings: Vec<String>,
}

/// Run the inflect command.
pub fn run_inflect(args: InflectArgs) -> miette::Result<i32> {
    let tables = load_tables(args.tables.as_deref())?;
    let inflector =
        Inflector::new(tables).map_err(|e| miette!("Failed to build inflector: {}", e))?;

    let token = Token::builder()
        .text(args.text.unwrap_or_else(|| args.lemma.clone()))
        .lemma(args.lemma)
        .pos(args.pos)
        .maybe_morph(args.morph)
        .build();

    match inflector.inflect_with_warnings(&token, &args.features) {
        Ok((form, warnings)) => {
            if args.json {
                let output = InflectResult {
                    form,
                    warnings: warnings.iter().map(ToString::to_string).collect(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                for warning in &warnings {
                    eprintln!("warning: {}", warning);
                }
                println!("{}", form);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                eprintln!("Inflection error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
