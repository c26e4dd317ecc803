//! Flexion CLI entry point.
//!
//! Provides command-line tools for the flexion inflection engine:
//! - `flexion inflect` - Inflect a token toward target features
//! - `flexion check` - Audit rule tables for lines the loader refused

mod commands;
mod output;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_inflect, CheckArgs, InflectArgs};

/// German inflection engine tools.
#[derive(Debug, Parser)]
#[command(name = "flexion")]
#[command(about = "German inflection engine tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inflect a token toward target features
    Inflect(InflectArgs),
    /// Audit rule tables and report refused lines
    Check(CheckArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Inflect(args) => run_inflect(args),
        Commands::Check(args) => run_check(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
