//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use std::path::{Path, PathBuf};

use clap::Subcommand;

pub mod compress;
pub mod init;
pub mod merge;
pub mod package;
pub mod rotate;
pub mod smoke_test;
pub mod split;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new skill directory from templates
    Init(init::InitArgs),

    /// Validate a skill directory
    Validate(validate::ValidateArgs),

    /// Validate and zip a skill for distribution
    Package(package::PackageArgs),

    /// Comprehensive validation plus example-prompt heuristics
    SmokeTest(smoke_test::SmokeTestArgs),

    /// Rewrite a PDF with compressed streams
    Compress(compress::CompressArgs),

    /// Concatenate PDFs in order
    Merge(merge::MergeArgs),

    /// Rotate PDF pages by 90, 180 or 270 degrees
    Rotate(rotate::RotateArgs),

    /// Write selected PDF pages to one file each
    Split(split::SplitArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Package(args) => package::run(ctx, args),
        Commands::SmokeTest(args) => smoke_test::run(ctx, args),
        Commands::Compress(args) => compress::run(ctx, args),
        Commands::Merge(args) => merge::run(ctx, args),
        Commands::Rotate(args) => rotate::run(ctx, args),
        Commands::Split(args) => split::run(ctx, args),
    }
}

/// Resolve a user-supplied path against the working directory.
pub fn resolve_path(ctx: &AppContext, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        ctx.working_dir.join(path)
    }
}
