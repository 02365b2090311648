//! skillsmith init - Create a new skill from templates

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::skill::init_skill;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Skill name: hyphen-case, lowercase letters, digits and hyphens, max 40 chars
    pub name: String,

    /// Directory the skill folder is created in
    #[arg(long)]
    pub path: PathBuf,

    /// Only SKILL.md, CHANGELOG.md and empty resource directories
    #[arg(long)]
    pub minimal: bool,
}

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    let parent = resolve_path(ctx, &args.path);
    let summary = init_skill(&args.name, &parent, args.minimal)?;

    if ctx.is_json() {
        return emit_json(&summary);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Initialized skill")
        .kv("Name", &summary.name)
        .kv("Location", &summary.skill_dir.display().to_string())
        .kv("Mode", if summary.minimal { "minimal" } else { "full" });
    layout.section("Created");
    for file in &summary.created {
        layout.bullet(file);
    }
    if summary.minimal {
        layout.bullet("scripts/, references/, assets/ (empty)");
    }

    layout.blank().section("Next steps");
    layout.push_line("1. Edit SKILL.md: complete the [TODO] items and the description");
    layout.push_line("2. Record initial features in CHANGELOG.md");
    if !summary.minimal {
        layout.push_line("3. Customize or delete the examples in scripts/, references/, assets/");
    }
    layout.push_line(format!(
        "{}. Run `skillsmith validate {}` when ready",
        if summary.minimal { 3 } else { 4 },
        summary.skill_dir.display()
    ));
    emit_human(layout);
    Ok(())
}
