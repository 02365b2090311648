//! Validation configuration and the per-run rule context.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::diagnostic::Severity;
use crate::skill::SkillDocument;

/// Knobs applied on top of each rule's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub disabled_rules: HashSet<String>,

    #[serde(default)]
    pub severity_overrides: HashMap<String, Severity>,

    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,

    /// Stop once this many errors were collected
    #[serde(default)]
    pub max_errors: Option<usize>,
}

impl ValidationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    #[must_use]
    pub const fn with_max_errors(mut self, max: usize) -> Self {
        self.max_errors = Some(max);
        self
    }

    #[must_use]
    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_id.into());
        self
    }

    #[must_use]
    pub fn override_severity(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides.insert(rule_id.into(), severity);
        self
    }

    #[must_use]
    pub fn is_rule_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.contains(rule_id)
    }

    /// Severity after overrides; strict mode lifts warnings to errors.
    #[must_use]
    pub fn effective_severity(&self, rule_id: &str, default: Severity) -> Severity {
        let severity = self
            .severity_overrides
            .get(rule_id)
            .copied()
            .unwrap_or(default);

        if self.strict && severity == Severity::Warning {
            Severity::Error
        } else {
            severity
        }
    }
}

/// What a rule sees while it runs.
pub struct ValidationContext<'a> {
    pub document: &'a SkillDocument,

    /// Directory holding SKILL.md; `None` for in-memory documents, in which
    /// case filesystem-backed rules stay silent.
    pub skill_dir: Option<&'a Path>,

    pub config: &'a ValidationConfig,
}

impl<'a> ValidationContext<'a> {
    #[must_use]
    pub const fn new(document: &'a SkillDocument, config: &'a ValidationConfig) -> Self {
        Self {
            document,
            skill_dir: None,
            config,
        }
    }

    #[must_use]
    pub const fn with_skill_dir(mut self, skill_dir: &'a Path) -> Self {
        self.skill_dir = Some(skill_dir);
        self
    }
}
