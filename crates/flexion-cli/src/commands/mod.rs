//! CLI command implementations.

mod check;
mod inflect;

use std::path::Path;

use flexion::Tables;
use miette::miette;

pub use check::{run_check, CheckArgs};
pub use inflect::{run_inflect, InflectArgs};

/// Load rule tables from a directory, or the builtin German tables when
/// no directory is given.
fn load_tables(dir: Option<&Path>) -> miette::Result<Tables> {
    match dir {
        Some(dir) => Tables::from_dir(dir)
            .map_err(|e| miette!("Failed to load tables from {}: {}", dir.display(), e)),
        None => {
            Tables::builtin_german().map_err(|e| miette!("Failed to load builtin tables: {}", e))
        }
    }
}
