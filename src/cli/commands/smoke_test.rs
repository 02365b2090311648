//! skillsmith smoke-test - Quick functional gate before manual testing

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::{Result, SmithError};
use crate::lint::SkillValidator;
use crate::skill::smoke_test;

#[derive(Args, Debug)]
pub struct SmokeTestArgs {
    /// Skill directory to test
    pub path: PathBuf,
}

pub fn run(ctx: &AppContext, args: &SmokeTestArgs) -> Result<()> {
    let skill_dir = resolve_path(ctx, &args.path);
    let validator = SkillValidator::new(ctx.config.validation.to_validation_config());

    let report = match smoke_test(&skill_dir, &validator, &ctx.config.smoke) {
        Ok(report) => report,
        Err(SmithError::SmokeTestFailed(details)) if !ctx.is_json() => {
            let mut layout = HumanLayout::new();
            layout
                .title("Smoke test")
                .kv("Skill", &skill_dir.display().to_string())
                .failure("FAIL")
                .blank();
            for line in details.lines() {
                layout.push_line(line);
            }
            emit_human(layout);
            return Err(SmithError::SmokeTestFailed(
                "comprehensive validation failed".to_string(),
            ));
        }
        Err(err) => return Err(err),
    };

    if ctx.is_json() {
        return emit_json(&report);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Smoke test")
        .kv("Skill", &report.validation.skill_dir.display().to_string())
        .kv("Prompts", &report.example_prompts.to_string())
        .success("Validation gate passed");
    if report.validation.report.contains("Warnings:") || report.validation.report.contains("Suggestions:") {
        layout.blank();
        for line in report.validation.report.lines() {
            layout.push_line(line);
        }
    }
    for warning in &report.warnings {
        layout.blank().warning(warning);
    }
    layout
        .blank()
        .success("Smoke test complete.")
        .push_line("Next: run two or three manual end-to-end use cases.");
    emit_human(layout);
    Ok(())
}
