//! Runs registered rules against a skill document.

use std::path::Path;

use serde::Serialize;
use tracing::trace;

use crate::skill::SkillDocument;

use super::config::{ValidationConfig, ValidationContext};
use super::diagnostic::{Diagnostic, RuleCategory, Severity};
use super::rule::BoxedRule;

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Stopped early because `max_errors` was reached
    pub truncated: bool,
    /// No error-severity diagnostics
    pub passed: bool,
}

impl ValidationResult {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            truncated: false,
            passed: true,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_severity(Severity::Warning)
    }

    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.by_severity(Severity::Info)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

pub struct ValidationEngine {
    rules: Vec<BoxedRule>,
    config: ValidationConfig,
}

impl ValidationEngine {
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ValidationConfig::default())
    }

    pub fn register(&mut self, rule: BoxedRule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn with_rule(mut self, rule: BoxedRule) -> Self {
        self.register(rule);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = BoxedRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validate a document, resolving file references against `skill_dir` when given.
    #[must_use]
    pub fn validate(&self, document: &SkillDocument, skill_dir: Option<&Path>) -> ValidationResult {
        let mut ctx = ValidationContext::new(document, &self.config);
        if let Some(dir) = skill_dir {
            ctx = ctx.with_skill_dir(dir);
        }
        self.validate_with_context(&ctx)
    }

    /// Rules run in registration order.
    #[must_use]
    pub fn validate_with_context(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut error_count = 0;

        for rule in &self.rules {
            if self.config.is_rule_disabled(rule.id()) {
                trace!(rule = rule.id(), "rule disabled");
                continue;
            }

            for mut diag in rule.validate(ctx) {
                diag.severity = self.config.effective_severity(rule.id(), diag.severity);
                diag.category = rule.category();

                if diag.severity == Severity::Error {
                    error_count += 1;
                }
                result.diagnostics.push(diag);

                if self.config.max_errors.is_some_and(|max| error_count >= max) {
                    result.truncated = true;
                    result.passed = false;
                    return result;
                }
            }
        }

        result.passed = error_count == 0;
        result
    }

    #[must_use]
    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|r| RuleInfo {
                id: r.id().to_string(),
                name: r.name().to_string(),
                description: r.description().to_string(),
                category: r.category(),
                severity: self.config.effective_severity(r.id(), r.default_severity()),
                disabled: self.config.is_rule_disabled(r.id()),
            })
            .collect()
    }
}

/// Description of a registered rule, as printed by `validate --list-rules`.
#[derive(Debug, Clone, Serialize)]
pub struct RuleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: RuleCategory,
    /// Severity after config overrides
    pub severity: Severity,
    pub disabled: bool,
}
