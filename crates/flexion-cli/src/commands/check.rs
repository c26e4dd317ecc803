//! Implementation of the `flexion check` command.

use std::path::PathBuf;

use clap::Args;
use miette::Report;
use serde::Serialize;

use crate::output::table::{format_rules_table, format_skipped_table};
use crate::output::RuleDiagnostic;

use super::load_tables;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Directory with rule tables. Defaults to the builtin German tables.
    #[arg(long)]
    pub tables: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one loaded rule file.
#[derive(Debug, Serialize)]
struct FileJson {
    file: String,
    rules: usize,
}

/// JSON output for one refused line.
#[derive(Debug, Serialize)]
struct SkippedJson {
    file: String,
    line: usize,
    text: String,
    reason: String,
}

/// JSON output for check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    files: Vec<FileJson>,
    skipped: Vec<SkippedJson>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let tables = load_tables(args.tables.as_deref())?;
    let report = tables.report();

    if args.json {
        let output = CheckJson {
            files: tables
                .rule_counts()
                .into_iter()
                .map(|(file, rules)| FileJson {
                    file: file.to_string(),
                    rules,
                })
                .collect(),
            skipped: report
                .skipped
                .iter()
                .map(|skip| SkippedJson {
                    file: skip.path.display().to_string(),
                    line: skip.line,
                    text: skip.text.clone(),
                    reason: skip.reason.clone(),
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("JSON serialization should not fail")
        );
    } else {
        println!("{}", format_rules_table(&tables.rule_counts()));

        if !report.skipped.is_empty() {
            println!("\n{}", format_skipped_table(&report.skipped));

            // Fancy diagnostics need the rule file back on disk, which the
            // builtin tables never are.
            for skip in &report.skipped {
                if let Some(diagnostic) = RuleDiagnostic::from_skipped(skip) {
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
        }
    }

    if report.is_clean() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
