//! Quality rules, run only by comprehensive validation.
//!
//! Everything here is advisory except `no-placeholders`: a skill with
//! `[TODO ...]` markers left in its body is not ready to ship.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::impl_rule;
use crate::lint::config::ValidationContext;
use crate::lint::diagnostic::{Diagnostic, RuleCategory, Severity};
use crate::lint::rule::{BoxedRule, ValidationRule};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

static TODO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[TODO[^\]]*\]").expect("todo regex"));

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*""#).expect("quoted regex"));

static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*>.*").expect("blockquote regex"));

static SECOND_PERSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(you|your|yours|you'll|you'd)\b").expect("second person regex")
});

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("inline code regex"));

static BACKSLASH_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.-]+(?:\\[A-Za-z0-9_.-]+)+").expect("backslash path regex")
});

/// Keyword groups; a skill should have a `##` section matching at least one.
const STRUCTURE_PATTERNS: &[&[&str]] = &[
    &["step", "workflow", "process"],
    &["task", "quick start", "quick reference"],
    &["capabilit", "feature"],
    &["guideline", "standard", "spec", "reference"],
];

fn is_overview(section: &str) -> bool {
    section.to_lowercase().contains("overview")
}

/// Files directly inside `dir` whose extension is one of `extensions`.
fn count_files(dir: &Path, extensions: &[&str]) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .count()
}

// =============================================================================
// BODY ORGANIZATION
// =============================================================================

impl_rule!(
    TitleHeadingRule,
    id: "title-heading",
    name: "Title Heading",
    description: "Body starts with a '# Title' heading",
    category: RuleCategory::Quality,
    severity: Severity::Warning,
    validate: |ctx| {
        if ctx.document.title().is_some() {
            vec![]
        } else {
            vec![Diagnostic::warning(
                "title-heading",
                "SKILL.md body has no '# Title' heading",
            )
            .with_suggestion("Add a level-one heading naming the skill")]
        }
    }
);

impl_rule!(
    OverviewSectionRule,
    id: "overview-section",
    name: "Overview Section",
    description: "Body has a '## Overview' section",
    category: RuleCategory::Quality,
    severity: Severity::Info,
    validate: |ctx| {
        if ctx.document.sections().iter().any(|s| is_overview(s)) {
            vec![]
        } else {
            vec![Diagnostic::info(
                "overview-section",
                "Consider adding an 'Overview' section for clarity",
            )]
        }
    }
);

impl_rule!(
    AdditionalSectionsRule,
    id: "additional-sections",
    name: "Additional Sections",
    description: "Body has at least one '##' section besides Overview",
    category: RuleCategory::Quality,
    severity: Severity::Warning,
    validate: |ctx| {
        if ctx.document.sections().iter().any(|s| !is_overview(s)) {
            vec![]
        } else {
            vec![Diagnostic::warning(
                "additional-sections",
                "SKILL.md has no sections beyond the overview - add workflow, tasks or reference sections",
            )]
        }
    }
);

pub struct StructurePatternRule;

impl ValidationRule for StructurePatternRule {
    fn id(&self) -> &'static str {
        "structure-pattern"
    }

    fn name(&self) -> &'static str {
        "Structure Pattern"
    }

    fn description(&self) -> &'static str {
        "Sections follow a workflow, task, capability or guideline layout"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let sections: Vec<String> = ctx
            .document
            .sections()
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let matches_any = STRUCTURE_PATTERNS.iter().any(|keywords| {
            sections
                .iter()
                .any(|section| keywords.iter().any(|kw| section.contains(kw)))
        });

        if matches_any {
            vec![]
        } else {
            vec![Diagnostic::info(
                self.id(),
                "Skill doesn't follow common structure patterns - see skill-maker references/structure-patterns.md",
            )
            .with_suggestion("Add a 'Workflow', 'Quick Reference', 'Capabilities' or 'Guidelines' section")]
        }
    }
}

pub struct NoPlaceholdersRule;

impl ValidationRule for NoPlaceholdersRule {
    fn id(&self) -> &'static str {
        "no-placeholders"
    }

    fn name(&self) -> &'static str {
        "No Placeholders"
    }

    fn description(&self) -> &'static str {
        "No [TODO ...] markers remain in the body"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let body = &ctx.document.body;
        let mut matches = TODO_RE.find_iter(body);
        let Some(first) = matches.next() else {
            return vec![];
        };
        let count = 1 + matches.count();

        vec![
            Diagnostic::error(
                self.id(),
                format!("Found {count} TODO placeholder(s) in body - complete before packaging"),
            )
            .at_line(ctx.document.body_line_of(first.start())),
        ]
    }
}

// =============================================================================
// STYLE
// =============================================================================

pub struct SecondPersonRule;

impl ValidationRule for SecondPersonRule {
    fn id(&self) -> &'static str {
        "second-person"
    }

    fn name(&self) -> &'static str {
        "Imperative Voice"
    }

    fn description(&self) -> &'static str {
        "Instructions avoid you/your outside quotes and blockquotes"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let unquoted = QUOTED_RE.replace_all(&ctx.document.body, "");
        let stripped = BLOCKQUOTE_RE.replace_all(&unquoted, "");
        let count = SECOND_PERSON_RE.find_iter(&stripped).count();

        if count == 0 {
            return vec![];
        }
        vec![Diagnostic::info(
            self.id(),
            format!(
                "Found {count} second-person pronoun(s) - consider using imperative form instead"
            ),
        )]
    }
}

pub struct BackslashPathsRule;

impl ValidationRule for BackslashPathsRule {
    fn id(&self) -> &'static str {
        "backslash-paths"
    }

    fn name(&self) -> &'static str {
        "Forward-slash Paths"
    }

    fn description(&self) -> &'static str {
        "Paths in prose use forward slashes"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let mut first_line = None;
        let mut examples = Vec::new();

        for (line_no, line) in ctx.document.prose_lines() {
            let prose = INLINE_CODE_RE.replace_all(line, "");
            for found in BACKSLASH_PATH_RE.find_iter(&prose) {
                first_line.get_or_insert(line_no);
                examples.push(found.as_str().to_string());
            }
        }

        let Some(line) = first_line else {
            return vec![];
        };
        vec![
            Diagnostic::warning(
                self.id(),
                format!(
                    "Found {} backslash path(s) - use forward slashes (e.g. {})",
                    examples.len(),
                    examples[0].replace('\\', "/")
                ),
            )
            .at_line(line),
        ]
    }
}

// =============================================================================
// DESCRIPTION
// =============================================================================

/// Trigger-pattern checks on the frontmatter description.
pub struct DescriptionQualityRule {
    min_length: usize,
}

impl Default for DescriptionQualityRule {
    fn default() -> Self {
        Self { min_length: 50 }
    }
}

impl DescriptionQualityRule {
    #[must_use]
    pub const fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl ValidationRule for DescriptionQualityRule {
    fn id(&self) -> &'static str {
        "description-quality"
    }

    fn name(&self) -> &'static str {
        "Description Quality"
    }

    fn description(&self) -> &'static str {
        "Description uses MUST, names its trigger ('when ...') and is long enough to match on"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Quality
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let Some(description) = ctx.document.description() else {
            return vec![];
        };
        let mut diagnostics = Vec::new();

        if !description.contains("MUST") && !description.contains("must") {
            diagnostics.push(Diagnostic::warning(
                self.id(),
                "Description should use 'MUST' keyword for stronger trigger pattern",
            ));
        }
        if !description.to_lowercase().contains("when") {
            diagnostics.push(Diagnostic::warning(
                self.id(),
                "Description should include trigger conditions ('when...')",
            ));
        }
        let length = description.chars().count();
        if length < self.min_length {
            diagnostics.push(Diagnostic::warning(
                self.id(),
                format!("Description may be too brief ({length} chars) - consider adding more detail"),
            ));
        }
        diagnostics
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

pub struct UnreferencedDirectoriesRule;

impl ValidationRule for UnreferencedDirectoriesRule {
    fn id(&self) -> &'static str {
        "unreferenced-directories"
    }

    fn name(&self) -> &'static str {
        "Referenced Resources"
    }

    fn description(&self) -> &'static str {
        "Populated references/ and scripts/ directories are mentioned in SKILL.md"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Resources
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic> {
        let Some(skill_dir) = ctx.skill_dir else {
            return vec![];
        };
        let content = &ctx.document.content;
        let mut diagnostics = Vec::new();

        for (dir, extensions) in [("references", &["md"][..]), ("scripts", &["py", "sh"][..])] {
            let count = count_files(&skill_dir.join(dir), extensions);
            let mentioned =
                content.contains(&format!("{dir}/")) || content.contains(&format!("{dir}\\"));
            if count > 0 && !mentioned {
                diagnostics.push(Diagnostic::info(
                    self.id(),
                    format!(
                        "{dir}/ directory exists with {count} file(s) but SKILL.md doesn't reference it"
                    ),
                ));
            }
        }
        diagnostics
    }
}

impl_rule!(
    ChangelogFileRule,
    id: "changelog-file",
    name: "Changelog File",
    description: "CHANGELOG.md sits next to SKILL.md",
    category: RuleCategory::Resources,
    severity: Severity::Info,
    validate: |ctx| {
        match ctx.skill_dir {
            Some(dir) if !dir.join("CHANGELOG.md").is_file() => vec![Diagnostic::info(
                "changelog-file",
                "No CHANGELOG.md found - consider adding one for version tracking",
            )],
            _ => vec![],
        }
    }
);

pub fn quality_rules() -> Vec<BoxedRule> {
    vec![
        Box::new(DescriptionQualityRule::default()),
        Box::new(TitleHeadingRule),
        Box::new(OverviewSectionRule),
        Box::new(AdditionalSectionsRule),
        Box::new(StructurePatternRule),
        Box::new(NoPlaceholdersRule),
        Box::new(SecondPersonRule),
        Box::new(BackslashPathsRule),
        Box::new(UnreferencedDirectoriesRule),
        Box::new(ChangelogFileRule),
    ]
}
