//! Table formatting utilities for CLI output.

use std::collections::BTreeMap;

use comfy_table::{presets, ContentArrangement, Table};
use flexion::tables::SkippedLine;

/// Format per-file rule counts as an ASCII table.
pub fn format_rules_table(counts: &BTreeMap<&str, usize>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Rules"]);

    for (file, rules) in counts {
        table.add_row(vec![(*file).to_string(), rules.to_string()]);
    }

    table
}

/// Format refused rule lines as an ASCII table.
pub fn format_skipped_table(skipped: &[SkippedLine]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Line", "Reason"]);

    for skip in skipped {
        table.add_row(vec![
            skip.path.display().to_string(),
            skip.line.to_string(),
            skip.reason.clone(),
        ]);
    }

    table
}
