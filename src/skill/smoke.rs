//! Pre-release smoke gate: comprehensive validation plus prompt heuristics.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SmokeConfig;
use crate::error::{Result, SmithError};
use crate::lint::{SkillValidator, ValidationOutcome};

use super::SkillDocument;

static QUOTED_PROMPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"][^'"]{8,}['"]"#).expect("quoted prompt regex"));

static QUESTION_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*]\s+.+\?$").expect("question bullet regex"));

#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub validation: ValidationOutcome,
    pub example_prompts: usize,
    pub min_example_prompts: usize,
    pub warnings: Vec<String>,
}

impl SmokeReport {
    pub const fn enough_prompts(&self) -> bool {
        self.example_prompts >= self.min_example_prompts
    }
}

/// Quoted strings of eight or more characters plus bullet lines ending in `?`.
pub fn count_example_prompts(text: &str) -> usize {
    QUOTED_PROMPT_RE.find_iter(text).count() + QUESTION_BULLET_RE.find_iter(text).count()
}

/// Fails with [`SmithError::SmokeTestFailed`] carrying the validation report
/// when comprehensive validation does not pass.
pub fn smoke_test(skill_dir: &Path, validator: &SkillValidator, config: &SmokeConfig) -> Result<SmokeReport> {
    let validation = validator.validate(skill_dir, true)?;
    if !validation.valid {
        return Err(SmithError::SmokeTestFailed(validation.report));
    }

    let document = SkillDocument::load(&validation.skill_dir)?;
    let example_prompts = count_example_prompts(&document.content);
    let mut warnings = Vec::new();
    if example_prompts < config.min_example_prompts {
        warn!(example_prompts, "few example prompts");
        warnings.push(format!(
            "fewer than {} example-like prompts detected in SKILL.md; add concrete example prompts to improve triggering",
            config.min_example_prompts
        ));
    }

    info!(skill = %validation.skill_dir.display(), example_prompts, "smoke test passed");
    Ok(SmokeReport {
        validation,
        example_prompts,
        min_example_prompts: config.min_example_prompts,
        warnings,
    })
}
