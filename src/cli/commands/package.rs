//! skillsmith package - Validate and zip a skill

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::{Result, SmithError};
use crate::lint::SkillValidator;
use crate::skill::package_skill;

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Skill directory to package
    pub path: PathBuf,

    /// Where to write `<skill>.zip` (defaults to the current directory)
    pub output_dir: Option<PathBuf>,

    /// Gate on comprehensive validation instead of the basic checks
    #[arg(long)]
    pub comprehensive: bool,
}

pub fn run(ctx: &AppContext, args: &PackageArgs) -> Result<()> {
    let skill_path = resolve_path(ctx, &args.path);
    let output_dir = args
        .output_dir
        .as_deref()
        .map_or_else(|| ctx.working_dir.clone(), |dir| resolve_path(ctx, dir));
    let validator = SkillValidator::new(ctx.config.validation.to_validation_config());

    let summary = match package_skill(
        &skill_path,
        &output_dir,
        &validator,
        args.comprehensive,
        &ctx.config.package,
    ) {
        Ok(summary) => summary,
        Err(SmithError::ValidationFailed(report)) if !ctx.is_json() => {
            let mut layout = HumanLayout::new();
            layout.title("Package").failure("Validation failed");
            for line in report.lines() {
                layout.push_line(format!("  {line}"));
            }
            layout.push_line("Fix the validation errors before packaging.");
            emit_human(layout);
            return Err(SmithError::ValidationFailed(format!(
                "{} was not packaged",
                skill_path.display()
            )));
        }
        Err(err) => return Err(err),
    };

    if ctx.is_json() {
        return emit_json(&summary);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Package")
        .kv("Skill", &summary.skill_dir.display().to_string())
        .success(summary.validation.report.lines().next().unwrap_or("valid"));
    layout.section("Entries");
    let total = summary.entries.len();
    for (index, entry) in summary.entries.iter().enumerate() {
        layout.bullet(&format!("({}/{total}) {entry}", index + 1));
    }
    layout
        .blank()
        .success(&format!("Packaged skill to {}", summary.archive.display()));
    emit_human(layout);
    Ok(())
}
