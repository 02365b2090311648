//! Command-line interface definitions.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "skillsmith",
    version,
    about = "Scaffold, validate and package skills; compress, merge, rotate and split PDFs",
    propagate_version = true
)]
pub struct Cli {
    /// Emit machine-readable JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Path to a config file (overrides global and project config)
    #[arg(long, global = true, env = "SKILLSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format requested on the command line.
    pub fn output_format(&self) -> OutputFormat {
        if self.robot {
            return OutputFormat::Json;
        }
        self.format.unwrap_or_default()
    }

    /// Whether the user picked a format explicitly.
    pub const fn format_explicit(&self) -> bool {
        self.robot || self.format.is_some()
    }
}
