//! Structural rules: the checks that gate validity and packaging.
//!
//! Registered in the order their messages should surface; in basic mode the
//! engine stops at the first error, so that message is the whole report.

use std::path::Path;

use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Diagnostic, RuleCategory, Severity};
use crate::lint::rule::{BoxedRule, ValidationRule};
use crate::skill::Frontmatter;

pub const MAX_SKILL_NAME_LENGTH: usize = 40;

/// Why `name` is not an acceptable skill name, if it isn't.
pub fn skill_name_problem(name: &str) -> Option<String> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Some(format!(
            "Name '{name}' should be hyphen-case (lowercase letters, digits, and hyphens only)"
        ));
    }
    if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return Some(format!(
            "Name '{name}' cannot start/end with hyphen or contain consecutive hyphens"
        ));
    }
    if name.len() > MAX_SKILL_NAME_LENGTH {
        return Some(format!(
            "Name '{name}' is too long ({} characters, maximum is {MAX_SKILL_NAME_LENGTH})",
            name.len()
        ));
    }
    None
}

/// `MAJOR.MINOR.PATCH`, digits only.
pub fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

pub struct FrontmatterRule;

impl ValidationRule for FrontmatterRule {
    fn id(&self) -> &'static str {
        "frontmatter"
    }

    fn name(&self) -> &'static str {
        "Frontmatter"
    }

    fn description(&self) -> &'static str {
        "SKILL.md must open with a ----delimited frontmatter block"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        match ctx.document.frontmatter {
            Frontmatter::Missing => vec![
                Diagnostic::error(self.id(), "No YAML frontmatter found")
                    .at_line(1)
                    .with_suggestion("Start SKILL.md with a '---' line"),
            ],
            Frontmatter::Malformed => vec![
                Diagnostic::error(self.id(), "Invalid frontmatter format")
                    .at_line(1)
                    .with_suggestion("Close the frontmatter with a '---' line"),
            ],
            Frontmatter::Present(_) => vec![],
        }
    }
}

pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn id(&self) -> &'static str {
        "required-fields"
    }

    fn name(&self) -> &'static str {
        "Required Fields"
    }

    fn description(&self) -> &'static str {
        "Frontmatter needs name, description and a metadata block with version and changelog"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let doc = ctx.document;
        if doc.frontmatter_text().is_none() {
            return vec![];
        }

        let mut diagnostics = Vec::new();
        for key in ["name", "description"] {
            if !doc.has_top_level_key(key) {
                diagnostics.push(Diagnostic::error(
                    self.id(),
                    format!("Missing '{key}' in frontmatter"),
                ));
            }
        }
        if doc.description().is_some_and(|d| d.trim().is_empty()) {
            diagnostics.push(Diagnostic::error(
                self.id(),
                "'description' in frontmatter is empty",
            ));
        }

        if !doc.has_top_level_key("metadata") {
            diagnostics.push(
                Diagnostic::error(self.id(), "Missing 'metadata' block in frontmatter")
                    .with_suggestion("Add 'metadata:' with indented 'version' and 'changelog'"),
            );
            return diagnostics;
        }
        for key in ["version", "changelog"] {
            if !doc.has_metadata_key(key) {
                diagnostics.push(Diagnostic::error(
                    self.id(),
                    format!("Missing 'metadata.{key}' in frontmatter"),
                ));
            }
        }
        diagnostics
    }
}

pub struct HyphenCaseNameRule;

impl ValidationRule for HyphenCaseNameRule {
    fn id(&self) -> &'static str {
        "hyphen-case-name"
    }

    fn name(&self) -> &'static str {
        "Hyphen-case Name"
    }

    fn description(&self) -> &'static str {
        "Skill names use lowercase letters, digits and single hyphens, at most 40 characters"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        ctx.document
            .name()
            .and_then(|name| skill_name_problem(&name))
            .map(|message| Diagnostic::error(self.id(), message))
            .into_iter()
            .collect()
    }
}

pub struct SemverVersionRule;

impl ValidationRule for SemverVersionRule {
    fn id(&self) -> &'static str {
        "semver-version"
    }

    fn name(&self) -> &'static str {
        "Semantic Version"
    }

    fn description(&self) -> &'static str {
        "metadata.version must be MAJOR.MINOR.PATCH"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        match ctx.document.version() {
            Some(version) if !is_semver(&version) => vec![
                Diagnostic::error(
                    self.id(),
                    format!(
                        "metadata.version '{version}' must follow semantic versioning (e.g., 1.0.0)"
                    ),
                )
                .with_suggestion("Use three dot-separated numbers such as 0.1.0"),
            ],
            _ => vec![],
        }
    }
}

pub struct DescriptionContentRule;

impl ValidationRule for DescriptionContentRule {
    fn id(&self) -> &'static str {
        "description-content"
    }

    fn name(&self) -> &'static str {
        "Description Content"
    }

    fn description(&self) -> &'static str {
        "Description has no angle brackets and no TODO placeholder"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let Some(description) = ctx.document.description() else {
            return vec![];
        };

        let mut diagnostics = Vec::new();
        if description.contains(['<', '>']) {
            diagnostics.push(Diagnostic::error(
                self.id(),
                "Description cannot contain angle brackets (< or >)",
            ));
        }
        if description.contains("[TODO") {
            diagnostics.push(
                Diagnostic::error(
                    self.id(),
                    "Description contains TODO placeholder - must be completed",
                )
                .with_suggestion("Say what the skill does and when to use it"),
            );
        }
        diagnostics
    }
}

pub struct ChangelogPathRule;

impl ChangelogPathRule {
    /// A changelog path may be written relative to the skills root
    /// (`<name>/CHANGELOG.md`) or to the skill directory itself.
    fn resolves(skill_dir: &Path, changelog: &str) -> bool {
        let relative = Path::new(changelog);
        skill_dir
            .parent()
            .into_iter()
            .chain(std::iter::once(skill_dir))
            .any(|base| base.join(relative).is_file())
    }
}

impl ValidationRule for ChangelogPathRule {
    fn id(&self) -> &'static str {
        "changelog-path"
    }

    fn name(&self) -> &'static str {
        "Changelog Path"
    }

    fn description(&self) -> &'static str {
        "metadata.changelog uses forward slashes and points at an existing file"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Structure
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let Some(changelog) = ctx.document.changelog() else {
            return vec![];
        };

        if changelog.contains('\\') {
            return vec![
                Diagnostic::error(
                    self.id(),
                    format!("metadata.changelog '{changelog}' must use forward slashes"),
                )
                .with_suggestion(changelog.replace('\\', "/")),
            ];
        }

        match ctx.skill_dir {
            Some(dir) if changelog.is_empty() || !Self::resolves(dir, &changelog) => vec![
                Diagnostic::error(
                    self.id(),
                    format!("metadata.changelog '{changelog}' does not point to an existing file"),
                )
                .with_suggestion("Create the file or fix the path, e.g. my-skill/CHANGELOG.md"),
            ],
            _ => vec![],
        }
    }
}

pub fn structural_rules() -> Vec<BoxedRule> {
    vec![
        Box::new(FrontmatterRule),
        Box::new(RequiredFieldsRule),
        Box::new(HyphenCaseNameRule),
        Box::new(SemverVersionRule),
        Box::new(DescriptionContentRule),
        Box::new(ChangelogPathRule),
    ]
}
