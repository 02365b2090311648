//! skillsmith validate - Validate a skill directory

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::{Result, SmithError};
use crate::lint::{SkillValidator, ValidationEngine, ValidationOutcome, all_rules};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Skill directory (or its SKILL.md)
    #[arg(required_unless_present = "list_rules")]
    pub path: Option<PathBuf>,

    /// Also run quality checks on the body and bundled resources
    #[arg(long)]
    pub comprehensive: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// List available rules and exit
    #[arg(long)]
    pub list_rules: bool,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let mut config = ctx.config.validation.to_validation_config();
    if args.strict {
        config = config.strict();
    }

    if args.list_rules {
        let engine = ValidationEngine::new(config).with_rules(all_rules());
        return list_rules(ctx, &engine);
    }

    let Some(path) = &args.path else {
        return Err(SmithError::InvalidArgument("skill path is required".to_string()));
    };
    let skill_dir = resolve_path(ctx, path);
    let outcome = SkillValidator::new(config).validate(&skill_dir, args.comprehensive)?;

    tracing::info!(
        valid = outcome.valid,
        errors = outcome.error_count(),
        warnings = outcome.warning_count(),
        suggestions = outcome.info_count(),
        "validated skill"
    );

    if ctx.is_json() {
        emit_json(&outcome)?;
    } else {
        emit_human(render(&outcome));
    }

    if outcome.valid {
        return Ok(());
    }
    let err = SmithError::ValidationFailed(format!("{} is not a valid skill", skill_dir.display()));
    // The outcome object already carries `valid: false`.
    Err(if ctx.is_json() { err.reported() } else { err })
}

/// Human rendering shared with `package` and `smoke-test`.
pub fn render(outcome: &ValidationOutcome) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout
        .title("Validation")
        .kv("Skill", &outcome.skill_dir.display().to_string())
        .kv(
            "Mode",
            if outcome.comprehensive {
                "comprehensive"
            } else {
                "basic"
            },
        )
        .blank();
    for line in outcome.report.lines() {
        layout.push_line(line);
    }
    layout.blank();
    if outcome.valid {
        layout.success("valid");
    } else {
        layout.failure("invalid");
    }
    layout
}

fn list_rules(ctx: &AppContext, engine: &ValidationEngine) -> Result<()> {
    let rules = engine.list_rules();
    if ctx.is_json() {
        return emit_json(&rules);
    }

    let mut layout = HumanLayout::new();
    layout.title("Validation rules");
    for rule in &rules {
        let state = if rule.disabled {
            "disabled".to_string()
        } else {
            rule.severity.to_string()
        };
        layout.kv(&rule.id, &format!("[{}/{state}] {}", rule.category, rule.description));
    }
    emit_human(layout);
    Ok(())
}
