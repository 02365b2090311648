//! Skill directory validation: structural gate plus optional quality pass.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::skill::{SKILL_FILE, SkillDocument};

use super::config::ValidationConfig;
use super::diagnostic::{Diagnostic, Severity};
use super::engine::ValidationEngine;
use super::rules::{quality_rules, structural_rules};

#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub skill_dir: PathBuf,
    pub comprehensive: bool,
    pub valid: bool,
    /// Human-readable summary; the first failure message in basic mode
    pub report: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationOutcome {
    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }
}

pub struct SkillValidator {
    config: ValidationConfig,
}

impl Default for SkillValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl SkillValidator {
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate the skill at `path`, which may name the directory or its SKILL.md.
    pub fn validate(&self, path: &Path, comprehensive: bool) -> Result<ValidationOutcome> {
        let skill_dir = if path.file_name().is_some_and(|name| name == SKILL_FILE) && path.is_file()
        {
            path.parent().unwrap_or(path).to_path_buf()
        } else {
            path.to_path_buf()
        };

        if !skill_dir.join(SKILL_FILE).is_file() {
            let message = format!("{SKILL_FILE} not found");
            return Ok(ValidationOutcome {
                skill_dir,
                comprehensive,
                valid: false,
                diagnostics: vec![Diagnostic::error("skill-file", &message)],
                report: message,
            });
        }

        let document = SkillDocument::load(&skill_dir)?;
        Ok(self.validate_document(&document, Some(&skill_dir), comprehensive))
    }

    /// Validate an already parsed document.
    pub fn validate_document(
        &self,
        document: &SkillDocument,
        skill_dir: Option<&Path>,
        comprehensive: bool,
    ) -> ValidationOutcome {
        let gate_config = self.config.clone().with_max_errors(1);
        let gate = ValidationEngine::new(gate_config)
            .with_rules(structural_rules())
            .validate(document, skill_dir);

        let outcome = |valid, report, diagnostics| ValidationOutcome {
            skill_dir: skill_dir.map(Path::to_path_buf).unwrap_or_default(),
            comprehensive,
            valid,
            report,
            diagnostics,
        };

        if !gate.passed {
            let report = gate
                .errors()
                .next()
                .map_or_else(|| "Validation failed".to_string(), |d| d.message.clone());
            debug!(report = %report, "structural validation failed");
            return outcome(false, report, gate.diagnostics);
        }

        let mut diagnostics = gate.diagnostics;
        if comprehensive {
            let quality = ValidationEngine::new(self.config.clone())
                .with_rules(quality_rules())
                .validate(document, skill_dir);
            debug!(
                errors = quality.error_count(),
                warnings = quality.warning_count(),
                "quality rules finished"
            );
            diagnostics.extend(quality.diagnostics);
        }

        let valid = !diagnostics.iter().any(|d| d.severity == Severity::Error);
        let report = format_report(&diagnostics);
        outcome(valid, report, diagnostics)
    }
}

/// Validate with default configuration.
pub fn validate_skill(path: &Path, comprehensive: bool) -> Result<ValidationOutcome> {
    SkillValidator::default().validate(path, comprehensive)
}

/// Render findings grouped by severity.
pub fn format_report(diagnostics: &[Diagnostic]) -> String {
    let group = |severity: Severity| -> Vec<&str> {
        diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    };
    let errors = group(Severity::Error);
    let warnings = group(Severity::Warning);
    let infos = group(Severity::Info);

    let headline = if !errors.is_empty() {
        format!("Validation failed with {} error(s):", errors.len())
    } else if !warnings.is_empty() {
        format!(
            "Basic validation passed, but {} warning(s) found:",
            warnings.len()
        )
    } else if !infos.is_empty() {
        format!("Validation passed with {} suggestion(s):", infos.len())
    } else {
        return "Skill is valid!".to_string();
    };

    let mut lines = vec![headline];
    for (label, messages) in [
        ("Errors:", errors),
        ("Warnings:", warnings),
        ("Suggestions:", infos),
    ] {
        if messages.is_empty() {
            continue;
        }
        lines.push(label.to_string());
        lines.extend(messages.iter().map(|m| format!("  - {m}")));
    }
    lines.join("\n")
}
